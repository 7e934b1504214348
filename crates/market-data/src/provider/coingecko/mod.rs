//! CoinGecko price-index provider.
//!
//! Serves volume, market cap and 24h change for token contracts via
//! /simple/token_price/{platform}. This is the primary source for every field
//! except liquidity, so its failures are reported as errors.
//!
//! API documentation: https://docs.coingecko.com/reference/simple-token-price

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{ChainId, DataKind, TokenStats};
use crate::provider::{MarketDataProvider, ProviderCapabilities, ProviderCriticality, RateLimit};

const BASE_URL: &str = "https://api.coingecko.com/api/v3";
const PROVIDER_ID: &str = "COINGECKO";

/// Asset platform slugs keyed by search-index chain id.
const PLATFORMS: &[(ChainId, &str)] = &[
    (1, "ethereum"),
    (10, "optimistic-ethereum"),
    (56, "binance-smart-chain"),
    (137, "polygon-pos"),
    (8453, "base"),
    (42161, "arbitrum-one"),
    (43114, "avalanche"),
    (501, "solana"),
];

/// Map a chain id to the CoinGecko asset platform slug.
pub fn platform_for_chain(chain_id: ChainId) -> Option<&'static str> {
    PLATFORMS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, platform)| *platform)
}

// ============================================================================
// API Response Structures
// ============================================================================

/// One entry of the /simple/token_price response, keyed by contract address.
#[derive(Debug, Deserialize)]
struct SimpleTokenPrice {
    usd: Option<f64>,
    usd_market_cap: Option<f64>,
    usd_24h_vol: Option<f64>,
    usd_24h_change: Option<f64>,
}

// ============================================================================
// CoinGeckoProvider
// ============================================================================

/// CoinGecko price-index provider.
///
/// Works keyless against the public API; a demo key raises the limits.
pub struct CoinGeckoProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the provider at another host (pro API, proxies, local mocks).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<String, MarketDataError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut request = self.client.get(&url).query(params);
        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        debug!("CoinGecko request: {}", endpoint);

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("CoinGecko rate limit hit");
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }
}

/// Parse a /simple/token_price body and pick the entry for `address`.
///
/// CoinGecko lowercases EVM addresses in the response keys, and reports an
/// unknown market cap as 0.
fn parse_token_price(address: &str, body: &str) -> Result<Option<TokenStats>, MarketDataError> {
    let prices: HashMap<String, SimpleTokenPrice> =
        serde_json::from_str(body).map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse token price response: {}", e),
        })?;

    let entry = prices
        .into_iter()
        .find(|(key, _)| {
            key == address || (address.starts_with("0x") && key.eq_ignore_ascii_case(address))
        })
        .map(|(_, entry)| entry);

    Ok(entry.map(|e| TokenStats {
        price_usd: e.usd,
        volume_24h_usd: e.usd_24h_vol,
        market_cap_usd: e.usd_market_cap.filter(|cap| *cap > 0.0),
        price_change_pct_24h: e.usd_24h_change,
    }))
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        1
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            data_kinds: &[DataKind::TokenStats],
        }
    }

    fn criticality(&self) -> ProviderCriticality {
        ProviderCriticality::Critical
    }

    fn rate_limit(&self) -> RateLimit {
        // Public tier allows roughly 30 calls per minute.
        RateLimit {
            requests_per_minute: 30,
            max_concurrency: 4,
        }
    }

    async fn get_token_stats(
        &self,
        chain_id: ChainId,
        address: &str,
    ) -> Result<Option<TokenStats>, MarketDataError> {
        let platform =
            platform_for_chain(chain_id).ok_or(MarketDataError::UnsupportedChain(chain_id))?;

        let endpoint = format!("/simple/token_price/{}", platform);
        let params = [
            ("contract_addresses", address),
            ("vs_currencies", "usd"),
            ("include_market_cap", "true"),
            ("include_24hr_vol", "true"),
            ("include_24hr_change", "true"),
        ];
        let body = self.fetch(&endpoint, &params).await?;
        parse_token_price(address, &body)
    }
}
