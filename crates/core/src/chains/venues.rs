use serde::{Deserialize, Serialize};

use super::{ChainId, ChainIdMap, ChainIdMapping};

/// Ethereum mainnet.
pub const DEFAULT_PRIMARY_CHAIN_ID: ChainId = 1;

/// USDC on Ethereum mainnet.
pub const DEFAULT_PRIMARY_STABLE_ASSET: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

/// Solana as numbered by the token search index.
pub const DEFAULT_RESTRICTED_SEARCH_CHAIN_ID: ChainId = 501;

/// Solana as numbered by the execution widget.
pub const DEFAULT_RESTRICTED_EXECUTION_CHAIN_ID: ChainId = 1_151_111_081_099_710;

/// USDC mint on Solana.
pub const DEFAULT_RESTRICTED_QUOTE_ASSET: &str = "EPjFWdd5AufqSSQGZTYCrF5rZvBAVj6SyHjv2Ts5Y9d";

/// The chain tokenized equities settle on, with its default quote currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementChain {
    pub chain_id: ChainId,
    /// Reference stable-value asset every equity is quoted against.
    pub stable_asset: String,
}

/// A venue whose assets can only be traded against its own quote asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictedVenue {
    /// Id used by the token search index.
    pub search_chain_id: ChainId,
    /// Id the execution widget expects.
    pub execution_chain_id: ChainId,
    /// Canonical quote asset on the venue.
    pub quote_asset: String,
}

/// Static venue configuration shared by the classifier and the resolver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueConfig {
    pub primary: SettlementChain,
    pub restricted: RestrictedVenue,
}

impl VenueConfig {
    /// The search/execution id remap implied by this configuration.
    pub fn chain_id_map(&self) -> ChainIdMap {
        ChainIdMap::new(vec![ChainIdMapping {
            search_id: self.restricted.search_chain_id,
            execution_id: self.restricted.execution_chain_id,
        }])
    }
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            primary: SettlementChain {
                chain_id: DEFAULT_PRIMARY_CHAIN_ID,
                stable_asset: DEFAULT_PRIMARY_STABLE_ASSET.to_string(),
            },
            restricted: RestrictedVenue {
                search_chain_id: DEFAULT_RESTRICTED_SEARCH_CHAIN_ID,
                execution_chain_id: DEFAULT_RESTRICTED_EXECUTION_CHAIN_ID,
                quote_asset: DEFAULT_RESTRICTED_QUOTE_ASSET.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_has_single_entry() {
        let config = VenueConfig::default();
        let map = config.chain_id_map();
        assert_eq!(map.entries().len(), 1);
        assert_eq!(
            map.to_execution(DEFAULT_RESTRICTED_SEARCH_CHAIN_ID),
            DEFAULT_RESTRICTED_EXECUTION_CHAIN_ID
        );
        assert_eq!(
            map.to_search(DEFAULT_RESTRICTED_EXECUTION_CHAIN_ID),
            DEFAULT_RESTRICTED_SEARCH_CHAIN_ID
        );
    }

    #[test]
    fn test_custom_venue_drives_map() {
        let mut config = VenueConfig::default();
        config.restricted.search_chain_id = 7;
        config.restricted.execution_chain_id = 70;

        let map = config.chain_id_map();
        assert_eq!(map.to_execution(7), 70);
        assert_eq!(
            map.to_execution(DEFAULT_RESTRICTED_SEARCH_CHAIN_ID),
            DEFAULT_RESTRICTED_SEARCH_CHAIN_ID
        );
    }
}
