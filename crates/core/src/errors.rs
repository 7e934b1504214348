//! Core error types.
//!
//! Classification and intent resolution are total and never fail; errors only
//! come from loading static data and from the widget's control surface.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The token catalog file could not be read.
    #[error("Failed to read token catalog '{path}': {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The token catalog is not valid JSON or does not match the schema.
    #[error("Invalid token catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// The swap widget rejected a field-set command.
    #[error("Swap form control rejected '{field}': {reason}")]
    ControlRejected { field: String, reason: String },
}
