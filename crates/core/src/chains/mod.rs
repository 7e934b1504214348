//! Chains module - chain identifiers and the venues the swap form is pinned to.

mod chain_id_map;
mod venues;

pub use chain_id_map::{ChainIdMap, ChainIdMapping};
pub use venues::{RestrictedVenue, SettlementChain, VenueConfig};

/// Integer chain identifier.
///
/// Wide enough for the execution widget's synthetic ids of non-EVM chains.
pub type ChainId = u64;
