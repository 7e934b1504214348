//! RWA Swap Core - token identity, asset classification and swap intents.
//!
//! This crate decides, for any token a user picks in the token search, which
//! chain and counter-asset the embedded swap widget must be driven to. It is
//! free of I/O apart from loading the static token catalog, and it never talks
//! to the network.

pub mod chains;
pub mod classification;
pub mod errors;
pub mod swap;
pub mod tokens;

pub use chains::{
    ChainId, ChainIdMap, ChainIdMapping, RestrictedVenue, SettlementChain, VenueConfig,
};
pub use classification::{AssetCategory, AssetClassifier};
pub use swap::{
    CommandBuffer, FieldSetCommand, FieldValue, FormField, SelectionDispatcher, SetFieldOptions,
    SwapFormControl, SwapFormState, SwapIntentResolver, SwapLegRole, TokenSelectionEvent,
    TokenSelectionHandler,
};
pub use tokens::{addresses_equal, CatalogEntry, Token, TokenCatalog};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
