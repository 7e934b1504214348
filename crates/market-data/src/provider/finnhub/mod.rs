//! Finnhub market quotes provider.
//!
//! Serves conventional equity quotes by ticker via the /quote endpoint. Used
//! as the fallback source of the 24h change for tokenized equities when the
//! price index has none.
//!
//! Finnhub free tier is limited to 60 API calls per minute.
//! API documentation: https://finnhub.io/docs/api

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{DataKind, TickerQuote};
use crate::provider::{MarketDataProvider, ProviderCapabilities, RateLimit};

const BASE_URL: &str = "https://finnhub.io/api/v1";
const PROVIDER_ID: &str = "FINNHUB";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /quote endpoint
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Current price
    c: Option<f64>,
    /// Percent change versus previous close
    dp: Option<f64>,
    // Note: d (change), h, l, o, pc, t exist but are not used
}

/// Error response from Finnhub
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

// ============================================================================
// FinnhubProvider
// ============================================================================

/// Finnhub market quotes provider.
pub struct FinnhubProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FinnhubProvider {
    /// Create a new Finnhub provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the provider at another host (proxies, local mocks).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Make a GET request to the Finnhub API.
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<String, MarketDataError> {
        let url = format!("{}{}", self.base_url, endpoint);

        // API key as header rather than query param
        let request = self
            .client
            .get(&url)
            .header("X-Finnhub-Token", &self.api_key)
            .query(params);

        debug!("Finnhub request: {} with {} params", endpoint, params.len());

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

        // 429 is the rate limit, 403 is an exhausted key quota
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Invalid or missing API key".to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if let Ok(ErrorResponse { error: Some(message) }) = serde_json::from_str(&body) {
                return Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message,
                });
            }

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

/// Parse a /quote body.
///
/// Finnhub answers unknown symbols with a zeroed quote instead of an error.
fn parse_quote(ticker: &str, body: &str) -> Result<Option<TickerQuote>, MarketDataError> {
    let response: QuoteResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse quote response: {}", e),
        })?;

    let price = response.c.filter(|c| *c != 0.0);
    if price.is_none() && response.dp.is_none() {
        return Err(MarketDataError::SymbolNotFound(ticker.to_string()));
    }

    Ok(Some(TickerQuote {
        ticker: ticker.to_string(),
        price,
        change_pct: response.dp.filter(|dp| dp.is_finite()),
    }))
}

#[async_trait]
impl MarketDataProvider for FinnhubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        2
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            data_kinds: &[DataKind::TickerQuote],
        }
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            requests_per_minute: 60,
            max_concurrency: 5,
        }
    }

    async fn get_ticker_quote(&self, ticker: &str) -> Result<Option<TickerQuote>, MarketDataError> {
        let ticker = ticker.trim().to_uppercase();
        let body = self.fetch("/quote", &[("symbol", ticker.as_str())]).await?;
        parse_quote(&ticker, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderCriticality;

    #[test]
    fn test_provider_metadata() {
        let provider = FinnhubProvider::new("test_key".to_string());
        assert_eq!(provider.id(), "FINNHUB");
        assert_eq!(provider.priority(), 2);
        assert_eq!(provider.criticality(), ProviderCriticality::Auxiliary);
        assert!(provider.capabilities().supports(DataKind::TickerQuote));
        assert!(!provider.capabilities().supports(DataKind::TokenStats));
    }

    #[test]
    fn test_rate_limit() {
        let provider = FinnhubProvider::new("test_key".to_string());
        let limit = provider.rate_limit();
        assert_eq!(limit.requests_per_minute, 60);
        assert_eq!(limit.max_concurrency, 5);
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let provider =
            FinnhubProvider::new("k".to_string()).with_base_url("http://localhost:9000/");
        assert_eq!(provider.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_parse_quote() {
        let body = r#"{"c":189.84,"d":-1.2,"dp":-0.6281,"h":191.0,"l":188.5,
            "o":190.1,"pc":191.04,"t":1700000000}"#;
        let quote = parse_quote("AAPL", body).unwrap().unwrap();
        assert_eq!(quote.ticker, "AAPL");
        assert_eq!(quote.price, Some(189.84));
        assert_eq!(quote.change_pct, Some(-0.6281));
    }

    #[test]
    fn test_parse_zeroed_quote_is_not_found() {
        let body = r#"{"c":0,"d":null,"dp":null,"h":0,"l":0,"o":0,"pc":0,"t":0}"#;
        let err = parse_quote("NOPE", body).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = parse_quote("AAPL", "<html>").unwrap_err();
        assert!(matches!(err, MarketDataError::ProviderError { .. }));
    }

    #[tokio::test]
    async fn test_unsupported_lookups() {
        let provider = FinnhubProvider::new("test_key".to_string());
        let err = provider.get_token_stats(1, "0xabc").await.unwrap_err();
        assert!(err.is_absence());
    }
}
