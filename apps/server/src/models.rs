use rwaswap_core::{AssetCategory, FieldSetCommand, SwapFormState, SwapLegRole, Token};
use rwaswap_market_data::{ChainId, TokenMarketRecord};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of the token-data batch request.
///
/// Entries are kept as raw JSON so non-string entries can be reported by
/// index instead of failing the whole body.
#[derive(Deserialize, ToSchema, Debug)]
pub struct TokenDataRequest {
    #[schema(value_type = Vec<String>)]
    pub addresses: Vec<serde_json::Value>,
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TokenDataResponse {
    pub chain_id: ChainId,
    #[schema(value_type = Vec<Object>)]
    pub tokens: Vec<TokenMarketRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TokenDataResponse {
    pub fn ok(chain_id: ChainId, tokens: Vec<TokenMarketRecord>) -> Self {
        Self {
            chain_id,
            tokens,
            error: None,
        }
    }

    pub fn failed(chain_id: ChainId, error: impl Into<String>) -> Self {
        Self {
            chain_id,
            tokens: Vec::new(),
            error: Some(error.into()),
        }
    }
}

#[derive(Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    #[schema(value_type = String, example = "destination")]
    pub role: SwapLegRole,
    #[schema(value_type = Object)]
    pub token: Token,
    /// Current form state; the response applies the commands to it.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub state: Option<SwapFormState>,
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    #[schema(value_type = String, example = "publicTokenizedEquity")]
    pub category: AssetCategory,
    #[schema(value_type = Vec<Object>)]
    pub commands: Vec<FieldSetCommand>,
    #[schema(value_type = Object)]
    pub state: SwapFormState,
}
