//! Tokens module - token identity and the static token catalog.

mod token_catalog;
mod tokens_model;

pub use token_catalog::{CatalogEntry, TokenCatalog};
pub use tokens_model::{addresses_equal, Token};
