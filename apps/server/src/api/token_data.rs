use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::FutureExt;
use rwaswap_market_data::{ChainId, MarketDataError};
use serde_json::Value;

use crate::{error::ApiError, main_lib::AppState, models::TokenDataResponse};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Market view for a batch of token addresses on one chain.
///
/// Never cached: every response carries no-store headers.
#[utoipa::path(
    post,
    path = "/api/v1/chains/{chainId}/token-data",
    params(
        ("chainId" = u64, Path, description = "Chain id as numbered by the token search index")
    ),
    request_body = crate::models::TokenDataRequest,
    responses(
        (
            status = 200,
            description = "One record per requested address, in request order",
            body = TokenDataResponse
        ),
        (status = 400, description = "Malformed request", body = TokenDataResponse),
        (status = 500, description = "Unexpected failure", body = TokenDataResponse)
    )
)]
pub async fn get_token_data(
    State(state): State<Arc<AppState>>,
    path: Result<Path<ChainId>, PathRejection>,
    body: Bytes,
) -> Response {
    let chain_id = match path {
        Ok(Path(chain_id)) => chain_id,
        Err(rejection) => {
            let mut response = ApiError::BadRequest(rejection.body_text()).into_response();
            set_no_store(response.headers_mut());
            return response;
        }
    };

    let addresses = match parse_addresses(&body) {
        Ok(addresses) => addresses,
        Err(message) => {
            return envelope(StatusCode::BAD_REQUEST, TokenDataResponse::failed(chain_id, message))
        }
    };

    let outcome = AssertUnwindSafe(state.token_data_service.token_data(chain_id, &addresses))
        .catch_unwind()
        .await
        .unwrap_or_else(|_| Err(MarketDataError::Internal("batch panicked".to_string())));

    match outcome {
        Ok(tokens) => envelope(StatusCode::OK, TokenDataResponse::ok(chain_id, tokens)),
        Err(MarketDataError::InvalidRequest(message)) => {
            envelope(StatusCode::BAD_REQUEST, TokenDataResponse::failed(chain_id, message))
        }
        Err(e) => {
            tracing::error!("Token data batch for chain {} failed: {}", chain_id, e);
            envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                TokenDataResponse::failed(chain_id, INTERNAL_ERROR_MESSAGE),
            )
        }
    }
}

/// Pull the address list out of the raw body, rejecting non-string entries.
///
/// Emptiness and blank strings are checked by the aggregator.
fn parse_addresses(body: &[u8]) -> Result<Vec<String>, String> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| format!("request body must be a JSON object: {}", e))?;

    let Some(entries) = value.get("addresses").and_then(Value::as_array) else {
        return Err("addresses must be a non-empty array".to_string());
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| format!("addresses[{}] must be a non-blank string", index))
        })
        .collect()
}

fn envelope(status: StatusCode, body: TokenDataResponse) -> Response {
    let mut response = (status, Json(body)).into_response();
    set_no_store(response.headers_mut());
    response
}

fn set_no_store(headers: &mut HeaderMap) {
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
}
