//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that all
//! market data providers must implement.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{ChainId, TickerQuote, TokenStats};

use super::capabilities::{ProviderCapabilities, ProviderCriticality, RateLimit};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source.
/// Only the lookups declared in [`ProviderCapabilities::data_kinds`] need to
/// be overridden; the rest default to `NotSupported`.
///
/// Every lookup distinguishes "no data" (`Ok(None)`) from failure (`Err`).
/// Both leave the field absent, but only failures are logged as such.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use rwaswap_market_data::provider::{MarketDataProvider, ProviderCapabilities, RateLimit};
///
/// struct MyVenue;
///
/// #[async_trait]
/// impl MarketDataProvider for MyVenue {
///     fn id(&self) -> &'static str {
///         "MY_VENUE"
///     }
///
///     fn capabilities(&self) -> ProviderCapabilities {
///         ProviderCapabilities {
///             data_kinds: &[DataKind::Liquidity],
///         }
///     }
///
///     fn rate_limit(&self) -> RateLimit {
///         RateLimit::default()
///     }
///
///     async fn get_liquidity(&self, chain_id: ChainId, address: &str)
///         -> Result<Option<f64>, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "COINGECKO", "FINNHUB", etc.
    /// Used for logging and throttling.
    fn id(&self) -> &'static str;

    /// Provider priority for ordering.
    ///
    /// Lower values = higher priority. Default is 10.
    fn priority(&self) -> u8 {
        10
    }

    /// Describes which lookups this provider answers.
    fn capabilities(&self) -> ProviderCapabilities;

    /// How failures of this provider should be reported.
    fn criticality(&self) -> ProviderCriticality {
        ProviderCriticality::Auxiliary
    }

    /// Rate limiting configuration.
    fn rate_limit(&self) -> RateLimit;

    /// Pool liquidity of a token in USD.
    async fn get_liquidity(
        &self,
        chain_id: ChainId,
        address: &str,
    ) -> Result<Option<f64>, MarketDataError> {
        let _ = (chain_id, address);
        Err(self.not_supported("liquidity"))
    }

    /// Venue-formatted market cap of a token.
    async fn get_market_cap_display(
        &self,
        chain_id: ChainId,
        address: &str,
    ) -> Result<Option<String>, MarketDataError> {
        let _ = (chain_id, address);
        Err(self.not_supported("market_cap_display"))
    }

    /// Price-index statistics of a token.
    async fn get_token_stats(
        &self,
        chain_id: ChainId,
        address: &str,
    ) -> Result<Option<TokenStats>, MarketDataError> {
        let _ = (chain_id, address);
        Err(self.not_supported("token_stats"))
    }

    /// Market quote for a conventional security ticker.
    async fn get_ticker_quote(&self, ticker: &str) -> Result<Option<TickerQuote>, MarketDataError> {
        let _ = ticker;
        Err(self.not_supported("ticker_quote"))
    }

    #[doc(hidden)]
    fn not_supported(&self, operation: &str) -> MarketDataError {
        MarketDataError::NotSupported {
            operation: operation.to_string(),
            provider: self.id().to_string(),
        }
    }
}
