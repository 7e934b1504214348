//! Error types for the market data crate.
//!
//! Only [`MarketDataError::InvalidRequest`] and [`MarketDataError::Internal`]
//! ever leave a batch. Every other variant describes a single provider lookup
//! and is absorbed by the registry, leaving that field absent.

use thiserror::Error;

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The batch request was malformed.
    /// Rejected before any provider is contacted.
    #[error("{0}")]
    InvalidRequest(String),

    /// The provider does not know this token or ticker.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider has no coverage for this chain.
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(u64),

    /// The provider does not implement this lookup.
    #[error("Operation '{operation}' not supported by {provider}")]
    NotSupported {
        /// The lookup that was attempted
        operation: String,
        /// The provider that was asked
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (bad status, malformed body).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// Unexpected failure in batch orchestration.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MarketDataError {
    /// Whether this error only says "this provider has nothing for you".
    ///
    /// Such errors are logged at debug level regardless of provider
    /// criticality.
    pub fn is_absence(&self) -> bool {
        matches!(
            self,
            Self::SymbolNotFound(_) | Self::UnsupportedChain(_) | Self::NotSupported { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absence_classification() {
        assert!(MarketDataError::SymbolNotFound("AAPL".to_string()).is_absence());
        assert!(MarketDataError::UnsupportedChain(999).is_absence());
        assert!(MarketDataError::NotSupported {
            operation: "liquidity".to_string(),
            provider: "COINGECKO".to_string(),
        }
        .is_absence());
        assert!(!MarketDataError::Timeout {
            provider: "COINGECKO".to_string(),
        }
        .is_absence());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::InvalidRequest("addresses must not be empty".to_string());
        assert_eq!(format!("{}", error), "addresses must not be empty");

        let error = MarketDataError::RateLimited {
            provider: "COINGECKO".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: COINGECKO");

        let error = MarketDataError::ProviderError {
            provider: "FINNHUB".to_string(),
            message: "Invalid or missing API key".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: FINNHUB - Invalid or missing API key"
        );
    }
}
