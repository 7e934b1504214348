use serde::{Deserialize, Serialize};

use crate::chains::ChainId;

/// A token as delivered by the search index or the static catalog.
///
/// Identity is the `(chain_id, address)` pair; see [`Token::same_identity`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub chain_id: ChainId,
    /// Chain-native address (hex for EVM chains, base58 for others).
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
}

impl Token {
    pub fn new(
        chain_id: ChainId,
        address: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            chain_id,
            address: address.into(),
            symbol: symbol.into(),
            name: name.into(),
            decimals,
            logo_uri: None,
        }
    }

    /// Whether both tokens denote the same on-chain asset.
    pub fn same_identity(&self, other: &Token) -> bool {
        self.chain_id == other.chain_id && self.has_address(&other.address)
    }

    /// Whether this token lives at `address`, using address comparison rules.
    pub fn has_address(&self, address: &str) -> bool {
        addresses_equal(&self.address, address)
    }
}

/// Compares two chain-native addresses.
///
/// Hex addresses (`0x` prefix) are checksummed in mixed case, so they compare
/// case-insensitively. Every other format (base58 mints, for example) is
/// case-sensitive and compares exactly.
pub fn addresses_equal(a: &str, b: &str) -> bool {
    let a = a.trim();
    let b = b.trim();
    if is_hex_address(a) && is_hex_address(b) {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

fn is_hex_address(address: &str) -> bool {
    address.starts_with("0x") || address.starts_with("0X")
}
