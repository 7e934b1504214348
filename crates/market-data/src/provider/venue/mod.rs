//! Venue sources for pool liquidity and venue-formatted market cap.
//!
//! Both sources are disabled upstream. `DisabledVenueProvider` stands in for
//! them and answers every lookup with "no data", so the merge rules behave as
//! if the venue had nothing for the token.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{ChainId, DataKind};
use crate::provider::{MarketDataProvider, ProviderCapabilities, RateLimit};

const PROVIDER_ID: &str = "VENUE";

/// Placeholder for the disabled liquidity and market cap venues.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledVenueProvider;

impl DisabledVenueProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MarketDataProvider for DisabledVenueProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        5
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            data_kinds: &[DataKind::Liquidity, DataKind::MarketCapDisplay],
        }
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit::default()
    }

    async fn get_liquidity(
        &self,
        _chain_id: ChainId,
        _address: &str,
    ) -> Result<Option<f64>, MarketDataError> {
        Ok(None)
    }

    async fn get_market_cap_display(
        &self,
        _chain_id: ChainId,
        _address: &str,
    ) -> Result<Option<String>, MarketDataError> {
        Ok(None)
    }
}
