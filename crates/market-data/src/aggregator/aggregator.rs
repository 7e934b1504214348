//! Market data aggregator.
//!
//! Fans a batch of addresses out to one task per token and merges the
//! provider answers for each token field by field.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, error};

use super::equity_lookup::EquityTickerLookup;
use crate::errors::MarketDataError;
use crate::models::{ChainId, MarketCapValue, ProviderId, TokenMarketRecord};
use crate::registry::ProviderRegistry;

/// Service seam the HTTP layer depends on.
#[async_trait]
pub trait TokenDataServiceTrait: Send + Sync {
    /// One record per requested address, in request order.
    async fn token_data(
        &self,
        chain_id: ChainId,
        addresses: &[String],
    ) -> Result<Vec<TokenMarketRecord>, MarketDataError>;

    /// Ids of the configured providers, in priority order.
    fn provider_ids(&self) -> Vec<ProviderId>;
}

/// Batch entry point for token market data.
///
/// Field sources, each resolved independently:
///
/// | Field        | Source order                                         |
/// |--------------|------------------------------------------------------|
/// | liquidity    | venue                                                |
/// | market cap   | venue display string, then price-index numeric value |
/// | 24h volume   | price index, else 0                                  |
/// | 24h change   | price index, then equity quote by ticker             |
#[derive(Clone)]
pub struct MarketDataAggregator {
    registry: Arc<ProviderRegistry>,
    equity_lookup: Arc<dyn EquityTickerLookup>,
}

impl MarketDataAggregator {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        equity_lookup: Arc<dyn EquityTickerLookup>,
    ) -> Self {
        Self {
            registry,
            equity_lookup,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Build one record per requested address, in request order.
    ///
    /// Fails only when the request itself is malformed. A token whose task
    /// dies gets an empty record; its siblings are unaffected.
    pub async fn aggregate(
        &self,
        chain_id: ChainId,
        addresses: &[String],
    ) -> Result<Vec<TokenMarketRecord>, MarketDataError> {
        validate_addresses(addresses)?;

        debug!(
            "Aggregating market data for {} tokens on chain {}",
            addresses.len(),
            chain_id
        );

        let tasks = addresses.iter().map(|address| {
            let registry = Arc::clone(&self.registry);
            let lookup = Arc::clone(&self.equity_lookup);
            let address = address.clone();
            tokio::spawn(async move {
                assemble_token(&registry, lookup.as_ref(), chain_id, &address).await
            })
        });

        let results = join_all(tasks).await;

        let records = addresses
            .iter()
            .zip(results)
            .map(|(address, result)| match result {
                Ok(record) => record,
                Err(e) => {
                    error!("Market data task for '{}' failed: {}", address, e);
                    TokenMarketRecord::empty(address.as_str())
                }
            })
            .collect();

        Ok(records)
    }
}

#[async_trait]
impl TokenDataServiceTrait for MarketDataAggregator {
    async fn token_data(
        &self,
        chain_id: ChainId,
        addresses: &[String],
    ) -> Result<Vec<TokenMarketRecord>, MarketDataError> {
        self.aggregate(chain_id, addresses).await
    }

    fn provider_ids(&self) -> Vec<ProviderId> {
        self.registry
            .providers()
            .iter()
            .map(|p| ProviderId::Borrowed(p.id()))
            .collect()
    }
}

fn validate_addresses(addresses: &[String]) -> Result<(), MarketDataError> {
    if addresses.is_empty() {
        return Err(MarketDataError::InvalidRequest(
            "addresses must be a non-empty array".to_string(),
        ));
    }

    if let Some(index) = addresses.iter().position(|a| a.trim().is_empty()) {
        return Err(MarketDataError::InvalidRequest(format!(
            "addresses[{}] must be a non-blank string",
            index
        )));
    }

    Ok(())
}

async fn assemble_token(
    registry: &ProviderRegistry,
    equity_lookup: &dyn EquityTickerLookup,
    chain_id: ChainId,
    address: &str,
) -> TokenMarketRecord {
    let (liquidity, display, stats) = tokio::join!(
        registry.fetch_liquidity(chain_id, address),
        registry.fetch_market_cap_display(chain_id, address),
        registry.fetch_token_stats(chain_id, address),
    );
    let stats = stats.unwrap_or_default();

    let market_cap = display
        .filter(|d| !d.trim().is_empty())
        .map(MarketCapValue::Display)
        .or_else(|| stats.market_cap_usd.map(MarketCapValue::Numeric));

    let change = match stats.price_change_pct_24h.filter(|c| c.is_finite()) {
        Some(change) => Some(change),
        None => match equity_lookup.underlying_ticker(address) {
            Some(ticker) => registry
                .fetch_ticker_quote(&ticker)
                .await
                .and_then(|quote| quote.change_pct),
            None => None,
        },
    };

    TokenMarketRecord::assemble(address, liquidity, stats.volume_24h_usd, market_cap, change)
}
