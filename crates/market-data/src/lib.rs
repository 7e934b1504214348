//! RWA Swap Market Data Crate
//!
//! This crate assembles a best-effort market view (liquidity, 24h volume,
//! market cap, 24h price change) for batches of token addresses from several
//! upstream providers that disagree and are only partially available.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |    Aggregator    |  (one task per token, per-field source priority)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | ProviderRegistry |  (capability filter, priority order, throttle, timeout)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Provider      |  (CoinGecko, Finnhub, venue sources)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | TokenMarketRecord|  (normalized, absent fields stay absent)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`MarketDataAggregator`] - Batch entry point
//! - [`ProviderRegistry`] - Provider orchestration
//! - [`MarketDataProvider`] - Trait implemented by every data source
//! - [`TokenMarketRecord`] - One merged record per requested address
//! - [`EquityTickerLookup`] - Injectable tradable-equity heuristic

pub mod aggregator;
pub mod errors;
pub mod format;
pub mod models;
pub mod provider;
pub mod registry;

pub use aggregator::{
    EquityTickerLookup, MarketDataAggregator, NoEquityLookup, StaticEquityLookup,
    TokenDataServiceTrait,
};
pub use errors::MarketDataError;
pub use format::format_market_cap;
pub use models::{
    ChainId, DataKind, MarketCapValue, ProviderId, TickerQuote, TokenMarketRecord, TokenStats,
};

// Re-export provider types
pub use provider::coingecko::CoinGeckoProvider;
pub use provider::finnhub::FinnhubProvider;
pub use provider::venue::DisabledVenueProvider;
pub use provider::{MarketDataProvider, ProviderCapabilities, ProviderCriticality, RateLimit};

// Re-export registry types
pub use registry::{ProviderRegistry, RateLimitConfig, RateLimiter, DEFAULT_CALL_TIMEOUT};
