//! Provider capabilities and rate limiting configuration.
//!
//! This module defines structures for describing what a market data provider
//! can do, how much its failures matter, and how it should be throttled.

use crate::models::DataKind;

/// Describes the capabilities of a market data provider.
///
/// Used by the registry to decide which providers to ask for a lookup.
#[derive(Clone, Debug)]
pub struct ProviderCapabilities {
    /// Lookups this provider answers.
    pub data_kinds: &'static [DataKind],
}

impl ProviderCapabilities {
    pub fn supports(&self, kind: DataKind) -> bool {
        self.data_kinds.contains(&kind)
    }
}

/// How loudly failures of a provider are reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderCriticality {
    /// Primary source for a field; failures are logged as errors.
    Critical,
    /// Optional or fallback source; failures are logged at debug level.
    Auxiliary,
}

/// Rate limiting configuration for a provider.
///
/// Controls how aggressively we can call a provider to avoid
/// hitting their rate limits and getting blocked.
#[derive(Clone, Debug)]
pub struct RateLimit {
    /// Maximum requests allowed per minute.
    pub requests_per_minute: u32,

    /// Maximum concurrent requests to this provider.
    pub max_concurrency: usize,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            max_concurrency: 5,
        }
    }
}
