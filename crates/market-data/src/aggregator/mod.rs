//! Batch assembly of per-token market records.
//!
//! - `aggregator` - The batch entry point and per-field merge rules
//! - `equity_lookup` - Injectable mapping from token address to equity ticker

mod aggregator;
mod equity_lookup;

pub use aggregator::{MarketDataAggregator, TokenDataServiceTrait};
pub use equity_lookup::{EquityTickerLookup, NoEquityLookup, StaticEquityLookup};
