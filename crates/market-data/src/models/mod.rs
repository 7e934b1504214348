//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `types` - Type aliases for common identifiers (ProviderId, ChainId, Ticker)
//! - `snapshot` - Raw provider answers (TokenStats, TickerQuote) and DataKind
//! - `record` - The merged per-token output (TokenMarketRecord)

mod record;
mod snapshot;
mod types;

pub use record::{MarketCapValue, TokenMarketRecord};
pub use snapshot::{DataKind, TickerQuote, TokenStats};
pub use types::{ChainId, ProviderId, Ticker};
