//! Provider registry module.
//!
//! This module provides orchestration for market data providers, including:
//! - Provider registration and priority ordering
//! - Rate and concurrency limiting per provider
//! - Per-call deadlines and failure logging

mod rate_limiter;
mod registry;

pub use rate_limiter::{RateLimitConfig, RateLimiter, RatePermit};
pub use registry::{ProviderRegistry, DEFAULT_CALL_TIMEOUT};
