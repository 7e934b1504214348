use std::sync::Arc;

use rwaswap_core::TokenCatalog;
use rwaswap_market_data::models::Ticker;
use rwaswap_market_data::EquityTickerLookup;

/// Answers the aggregator's equity question from the static token catalog.
pub struct CatalogTickerLookup {
    catalog: Arc<TokenCatalog>,
}

impl CatalogTickerLookup {
    pub fn new(catalog: Arc<TokenCatalog>) -> Self {
        Self { catalog }
    }
}

impl EquityTickerLookup for CatalogTickerLookup {
    fn underlying_ticker(&self, address: &str) -> Option<Ticker> {
        self.catalog.underlying_ticker(address).map(Ticker::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let catalog = TokenCatalog::from_json_str(
            r#"[
                {"chainId": 1, "address": "0xaapl", "symbol": "AAPLx", "name": "Apple xStock",
                 "decimals": 18, "underlyingTicker": "AAPL"},
                {"chainId": 1, "address": "0xusdc", "symbol": "USDC", "name": "USD Coin",
                 "decimals": 6}
            ]"#,
        )
        .unwrap();
        let lookup = CatalogTickerLookup::new(Arc::new(catalog));

        assert_eq!(lookup.underlying_ticker("0xaapl").as_deref(), Some("AAPL"));
        assert!(lookup.underlying_ticker("0xusdc").is_none());
        assert!(lookup.underlying_ticker("0xunknown").is_none());
    }
}
