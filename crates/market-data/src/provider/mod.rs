//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Provider capabilities, criticality and rate limiting configuration
//! - Concrete provider implementations
//!
//! # Providers
//!
//! | Provider  | Lookups                         | Criticality |
//! |-----------|---------------------------------|-------------|
//! | CoinGecko | token stats                     | Critical    |
//! | Finnhub   | ticker quotes                   | Auxiliary   |
//! | Venue     | liquidity, market cap display   | Auxiliary   |
//!
//! The venue sources are currently disabled upstream. They are kept as a
//! provider that always answers "no data" so enabling them again is a matter
//! of swapping the implementation, not touching the merge logic.

mod capabilities;
mod traits;

pub mod coingecko;
pub mod finnhub;
pub mod venue;

// Re-exports
pub use capabilities::{ProviderCapabilities, ProviderCriticality, RateLimit};
pub use traits::MarketDataProvider;
