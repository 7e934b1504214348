//! Asset classification.
//!
//! Every token falls into exactly one [`AssetCategory`]:
//! - restricted-venue assets are recognised by their search-index chain id
//! - tokenized equities live on the primary settlement chain and are anything
//!   other than its reference stable asset
//! - everything else is ordinary

use serde::{Deserialize, Serialize};

use crate::chains::{ChainId, VenueConfig};
use crate::tokens::{addresses_equal, Token};

/// Routing category of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetCategory {
    /// Traded only on the restricted venue, against the venue's quote asset.
    PrivateRestrictedAsset,
    /// Tokenized security quoted against the primary chain's stable asset.
    PublicTokenizedEquity,
    /// Any other token; routed wherever the widget can take it.
    Ordinary,
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PrivateRestrictedAsset => write!(f, "PrivateRestrictedAsset"),
            Self::PublicTokenizedEquity => write!(f, "PublicTokenizedEquity"),
            Self::Ordinary => write!(f, "Ordinary"),
        }
    }
}

/// Pure classifier over static venue configuration.
#[derive(Clone, Debug)]
pub struct AssetClassifier {
    restricted_search_chain_id: ChainId,
    primary_chain_id: ChainId,
    primary_stable_asset: String,
}

impl AssetClassifier {
    pub fn new(venues: &VenueConfig) -> Self {
        Self {
            restricted_search_chain_id: venues.restricted.search_chain_id,
            primary_chain_id: venues.primary.chain_id,
            primary_stable_asset: venues.primary.stable_asset.clone(),
        }
    }

    /// Classify a token received from the search index.
    ///
    /// The restricted venue is matched on its search-index id only; the
    /// widget's execution id never appears in search results.
    pub fn classify(&self, token: &Token) -> AssetCategory {
        if token.chain_id == self.restricted_search_chain_id {
            AssetCategory::PrivateRestrictedAsset
        } else if token.chain_id == self.primary_chain_id
            && !addresses_equal(&token.address, &self.primary_stable_asset)
        {
            AssetCategory::PublicTokenizedEquity
        } else {
            AssetCategory::Ordinary
        }
    }
}

impl Default for AssetClassifier {
    fn default() -> Self {
        Self::new(&VenueConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn token(chain_id: ChainId, address: &str) -> Token {
        Token::new(chain_id, address, "TKN", "Token", 18)
    }

    fn venues() -> VenueConfig {
        VenueConfig::default()
    }

    #[test]
    fn test_restricted_venue_token() {
        let classifier = AssetClassifier::default();
        let category = classifier.classify(&token(venues().restricted.search_chain_id, "X"));
        assert_eq!(category, AssetCategory::PrivateRestrictedAsset);
    }

    #[test]
    fn test_execution_id_is_not_a_restricted_search_id() {
        let classifier = AssetClassifier::default();
        let category = classifier.classify(&token(venues().restricted.execution_chain_id, "X"));
        assert_eq!(category, AssetCategory::Ordinary);
    }

    #[test]
    fn test_equity_on_primary_chain() {
        let classifier = AssetClassifier::default();
        let category =
            classifier.classify(&token(1, "0x14c3abF95Cb9C93a8b82C1CdCB76D72Cb87b2d4c"));
        assert_eq!(category, AssetCategory::PublicTokenizedEquity);
    }

    #[test]
    fn test_stable_asset_on_primary_chain_is_ordinary() {
        let classifier = AssetClassifier::default();
        let lower = venues().primary.stable_asset.to_lowercase();
        assert_eq!(classifier.classify(&token(1, &lower)), AssetCategory::Ordinary);
    }

    #[test]
    fn test_other_chains_are_ordinary() {
        let classifier = AssetClassifier::default();
        assert_eq!(classifier.classify(&token(8453, "0xabc")), AssetCategory::Ordinary);
        assert_eq!(classifier.classify(&token(42161, "0xabc")), AssetCategory::Ordinary);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(
            AssetCategory::PublicTokenizedEquity.to_string(),
            "PublicTokenizedEquity"
        );
    }

    fn chain_ids() -> impl Strategy<Value = ChainId> {
        let v = venues();
        prop_oneof![
            Just(v.primary.chain_id),
            Just(v.restricted.search_chain_id),
            Just(v.restricted.execution_chain_id),
            any::<ChainId>(),
        ]
    }

    fn addresses() -> impl Strategy<Value = String> {
        let stable = venues().primary.stable_asset;
        prop_oneof![
            Just(stable.clone()),
            Just(stable.to_lowercase()),
            "0x[0-9a-fA-F]{40}",
            "[1-9A-HJ-NP-Za-km-z]{32,44}",
        ]
    }

    proptest! {
        #[test]
        fn classification_is_pure_and_consistent(chain_id in chain_ids(), address in addresses()) {
            let classifier = AssetClassifier::default();
            let t = token(chain_id, &address);
            let first = classifier.classify(&t);
            prop_assert_eq!(first, classifier.classify(&t));

            let v = venues();
            let expected = if chain_id == v.restricted.search_chain_id {
                AssetCategory::PrivateRestrictedAsset
            } else if chain_id == v.primary.chain_id
                && !address.eq_ignore_ascii_case(&v.primary.stable_asset)
            {
                AssetCategory::PublicTokenizedEquity
            } else {
                AssetCategory::Ordinary
            };
            prop_assert_eq!(first, expected);
        }
    }
}
