//! Per-provider throttling for market data providers.
//!
//! Each provider gets a token bucket bounding its request rate and a
//! semaphore bounding how many of its calls are in flight at once.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::errors::MarketDataError;
use crate::models::ProviderId;
use crate::provider::RateLimit;

/// Default rate limit: 60 requests per minute.
const DEFAULT_REQUESTS_PER_MINUTE: f64 = 60.0;

/// Default bucket capacity (allows bursting).
const DEFAULT_BUCKET_CAPACITY: f64 = 10.0;

/// Default number of in-flight calls per provider.
const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// Token bucket for a single provider.
#[derive(Debug)]
struct TokenBucket {
    /// Current number of available tokens.
    tokens: f64,
    /// Last time the bucket was updated.
    last_update: Instant,
    /// Token refill rate (tokens per second).
    rate: f64,
    /// Maximum bucket capacity.
    capacity: f64,
}

impl TokenBucket {
    /// Create a new token bucket with default settings.
    fn new() -> Self {
        Self {
            tokens: DEFAULT_BUCKET_CAPACITY,
            last_update: Instant::now(),
            rate: DEFAULT_REQUESTS_PER_MINUTE / 60.0, // Convert to per-second
            capacity: DEFAULT_BUCKET_CAPACITY,
        }
    }

    /// Create a token bucket with custom settings.
    ///
    /// The rate is at least one request per minute and the capacity at least
    /// one token, so a waiting caller is always eventually admitted.
    fn with_config(requests_per_minute: u32, capacity: f64) -> Self {
        let capacity = if capacity.is_finite() {
            capacity.max(1.0)
        } else {
            DEFAULT_BUCKET_CAPACITY
        };
        Self {
            tokens: capacity,
            last_update: Instant::now(),
            rate: requests_per_minute.max(1) as f64 / 60.0,
            capacity,
        }
    }

    /// Refill tokens based on elapsed time.
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        let new_tokens = elapsed * self.rate;

        self.tokens = (self.tokens + new_tokens).min(self.capacity);
        self.last_update = now;
    }

    /// Try to acquire a token immediately.
    /// Returns true if a token was available, false otherwise.
    fn try_acquire(&mut self) -> bool {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Calculate the wait time until a token becomes available.
    fn time_until_available(&mut self) -> Duration {
        self.refill();

        if self.tokens >= 1.0 {
            Duration::ZERO
        } else {
            let tokens_needed = 1.0 - self.tokens;
            let seconds_needed = tokens_needed / self.rate;
            Duration::from_secs_f64(seconds_needed)
        }
    }
}

/// Rate limiter configuration for a provider.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Maximum requests per minute.
    pub requests_per_minute: u32,
    /// Maximum burst capacity.
    pub burst_capacity: f64,
    /// Maximum calls in flight at once.
    pub max_concurrency: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE as u32,
            burst_capacity: DEFAULT_BUCKET_CAPACITY,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl From<RateLimit> for RateLimitConfig {
    fn from(limit: RateLimit) -> Self {
        let requests_per_minute = limit.requests_per_minute.max(1);
        Self {
            requests_per_minute,
            // Ten seconds worth of requests may burst.
            burst_capacity: (requests_per_minute as f64 / 6.0).max(1.0),
            max_concurrency: limit.max_concurrency.max(1),
        }
    }
}

/// Proof that a call to a provider was admitted.
///
/// Holds one of the provider's concurrency slots until dropped.
#[derive(Debug)]
pub struct RatePermit {
    _slot: OwnedSemaphorePermit,
}

/// Rate and concurrency limiter for multiple providers.
///
/// Thread-safe limiter that maintains per-provider token buckets and
/// concurrency slots. Both are created on-demand with default settings, or
/// can be pre-configured with custom limits.
pub struct RateLimiter {
    /// Per-provider token buckets.
    buckets: Mutex<HashMap<String, TokenBucket>>,
    /// Per-provider concurrency slots.
    slots: Mutex<HashMap<String, Arc<Semaphore>>>,
    /// Per-provider configuration overrides.
    configs: Mutex<HashMap<String, RateLimitConfig>>,
}

impl RateLimiter {
    /// Create a new rate limiter with default settings.
    pub fn new() -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            slots: Mutex::new(HashMap::new()),
            configs: Mutex::new(HashMap::new()),
        }
    }

    /// Lock the buckets mutex, recovering from poison if necessary.
    ///
    /// For rate limiting, it's safe to recover from a poisoned mutex since
    /// the worst case is slightly incorrect rate limiting, which is better
    /// than panicking.
    fn lock_buckets(&self) -> MutexGuard<'_, HashMap<String, TokenBucket>> {
        self.buckets.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter buckets mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<String, Arc<Semaphore>>> {
        self.slots.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter slots mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Lock the configs mutex, recovering from poison if necessary.
    fn lock_configs(&self) -> MutexGuard<'_, HashMap<String, RateLimitConfig>> {
        self.configs.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter configs mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Configure rate limits for a specific provider.
    pub fn configure(&self, provider: &ProviderId, config: RateLimitConfig) {
        let mut configs = self.lock_configs();
        configs.insert(provider.to_string(), config);
        drop(configs); // Release configs lock before acquiring buckets lock

        // Reset the bucket and slots if they already exist
        self.lock_buckets().remove(provider.as_ref());
        self.lock_slots().remove(provider.as_ref());
    }

    /// Admit one call to the given provider.
    ///
    /// Waits (asynchronously) for a token, then for a free concurrency slot.
    /// The returned permit keeps the slot busy until it is dropped.
    pub async fn acquire(&self, provider: &ProviderId) -> Result<RatePermit, MarketDataError> {
        self.wait_for_token(provider).await;

        let slots = self.slots_for(provider);
        let slot = slots.acquire_owned().await.map_err(|_| {
            MarketDataError::Internal(format!("concurrency slots for '{}' closed", provider))
        })?;

        Ok(RatePermit { _slot: slot })
    }

    async fn wait_for_token(&self, provider: &ProviderId) {
        while let Some(wait_time) = self.take_token(provider) {
            debug!(
                "Rate limiter: waiting {:?} for provider '{}'",
                wait_time, provider
            );
            tokio::time::sleep(wait_time).await;
        }
        debug!("Rate limiter: acquired token for '{}'", provider);
    }

    /// Take a token if one is available.
    ///
    /// Returns `None` on success, otherwise how long until the next token.
    fn take_token(&self, provider: &ProviderId) -> Option<Duration> {
        let mut buckets = self.lock_buckets();

        let bucket = buckets
            .entry(provider.to_string())
            .or_insert_with(|| self.create_bucket(provider));

        if bucket.try_acquire() {
            None
        } else {
            Some(bucket.time_until_available().max(Duration::from_millis(1)))
        }
    }

    fn slots_for(&self, provider: &ProviderId) -> Arc<Semaphore> {
        let max = self
            .lock_configs()
            .get(provider.as_ref())
            .map(|c| c.max_concurrency.max(1))
            .unwrap_or(DEFAULT_MAX_CONCURRENCY);

        self.lock_slots()
            .entry(provider.to_string())
            .or_insert_with(|| Arc::new(Semaphore::new(max)))
            .clone()
    }

    /// Create a bucket for a provider, using custom config if available.
    fn create_bucket(&self, provider: &ProviderId) -> TokenBucket {
        let configs = self.lock_configs();

        if let Some(config) = configs.get(provider.as_ref()) {
            TokenBucket::with_config(config.requests_per_minute, config.burst_capacity)
        } else {
            TokenBucket::new()
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
