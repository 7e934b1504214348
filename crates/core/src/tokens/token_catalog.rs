//! Static token catalog.
//!
//! The catalog is a JSON array of tokens, optionally annotated with the ticker
//! of the conventional security a token represents:
//!
//! ```json
//! [
//!   { "chainId": 1, "address": "0x...", "symbol": "AAPLon", "name": "Apple",
//!     "decimals": 18, "underlyingTicker": "AAPL" }
//! ]
//! ```

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::tokens_model::Token;
use crate::chains::ChainId;
use crate::errors::{Error, Result};

/// A catalog row: a token plus optional equity metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub token: Token,
    /// Ticker of the underlying security for tokenized equities/ETFs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying_ticker: Option<String>,
}

/// In-memory, read-only token catalog.
#[derive(Clone, Debug, Default)]
pub struct TokenCatalog {
    entries: Vec<CatalogEntry>,
}

impl TokenCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Load a catalog file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::CatalogIo {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&raw)?;
        info!(
            "Loaded token catalog from '{}' ({} entries, {} equities)",
            path.display(),
            catalog.len(),
            catalog.equity_count()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Look up a token by its identity.
    pub fn find(&self, chain_id: ChainId, address: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.token.chain_id == chain_id && e.token.has_address(address))
    }

    /// Underlying ticker for the token at `address` on any chain.
    ///
    /// Tokenized equities are bridged to several chains under the same ticker,
    /// so the lookup ignores the chain id.
    pub fn underlying_ticker(&self, address: &str) -> Option<&str> {
        let ticker = self
            .entries
            .iter()
            .find(|e| e.token.has_address(address))
            .and_then(|e| e.underlying_ticker.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty());
        if ticker.is_none() {
            debug!("No underlying ticker in catalog for '{}'", address);
        }
        ticker
    }

    fn equity_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.underlying_ticker.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CATALOG: &str = r#"[
        {"chainId": 1, "address": "0xAAA0000000000000000000000000000000000001",
         "symbol": "AAPLon", "name": "Apple", "decimals": 18, "underlyingTicker": "AAPL"},
        {"chainId": 1, "address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
         "symbol": "USDC", "name": "USD Coin", "decimals": 6},
        {"chainId": 56, "address": "0xBBB0000000000000000000000000000000000002",
         "symbol": "SPYon", "name": "SPDR S&P 500", "decimals": 18, "underlyingTicker": "  "}
    ]"#;

    #[test]
    fn test_parse_and_find() {
        let catalog = TokenCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);

        let usdc = catalog
            .find(1, "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
            .unwrap();
        assert_eq!(usdc.token.symbol, "USDC");
        assert!(catalog
            .find(8453, "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
            .is_none());
    }

    #[test]
    fn test_underlying_ticker_ignores_chain_and_case() {
        let catalog = TokenCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(
            catalog.underlying_ticker("0xaaa0000000000000000000000000000000000001"),
            Some("AAPL")
        );
        assert_eq!(
            catalog.underlying_ticker("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            None
        );
    }

    #[test]
    fn test_blank_ticker_is_treated_as_missing() {
        let catalog = TokenCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(
            catalog.underlying_ticker("0xBBB0000000000000000000000000000000000002"),
            None
        );
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let catalog = TokenCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.equity_count(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TokenCatalog::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::CatalogIo { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = TokenCatalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::CatalogParse(_)));
    }
}
