//! Provider registry for orchestrating market data providers.
//!
//! The registry manages multiple providers, handling:
//! - Provider selection based on the lookup being made
//! - Fallback to the next provider when one has no data or fails
//! - Rate and concurrency limiting per provider
//! - A deadline on every provider call
//!
//! Lookups never fail. A failed or timed-out provider is logged and skipped;
//! when no provider answers the field is simply absent.

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};

use super::rate_limiter::{RateLimitConfig, RateLimiter};
use crate::errors::MarketDataError;
use crate::models::{ChainId, DataKind, ProviderId, TickerQuote, TokenStats};
use crate::provider::{MarketDataProvider, ProviderCriticality};

/// Default deadline for one provider call, throttle wait included.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(8);

/// Provider registry for orchestrating market data lookups.
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn MarketDataProvider>>,
    rate_limiter: RateLimiter,
    call_timeout: Duration,
}

impl ProviderRegistry {
    /// Create a new provider registry.
    ///
    /// Providers are ordered by priority and their declared rate limits are
    /// installed in the limiter.
    pub fn new(mut providers: Vec<Arc<dyn MarketDataProvider>>) -> Self {
        providers.sort_by_key(|p| p.priority());

        let rate_limiter = RateLimiter::new();
        for provider in &providers {
            let id: ProviderId = Cow::Borrowed(provider.id());
            rate_limiter.configure(&id, RateLimitConfig::from(provider.rate_limit()));
        }

        Self {
            providers,
            rate_limiter,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Override the per-call deadline.
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    /// Get the list of registered providers, in priority order.
    pub fn providers(&self) -> &[Arc<dyn MarketDataProvider>] {
        &self.providers
    }

    /// Pool liquidity in USD from the first provider that has it.
    pub async fn fetch_liquidity(&self, chain_id: ChainId, address: &str) -> Option<f64> {
        self.fetch_first(DataKind::Liquidity, address, |p| async move {
            p.get_liquidity(chain_id, address).await
        })
        .await
    }

    /// Venue-formatted market cap from the first provider that has it.
    pub async fn fetch_market_cap_display(
        &self,
        chain_id: ChainId,
        address: &str,
    ) -> Option<String> {
        self.fetch_first(DataKind::MarketCapDisplay, address, |p| async move {
            p.get_market_cap_display(chain_id, address).await
        })
        .await
    }

    /// Price-index statistics from the first provider that has them.
    pub async fn fetch_token_stats(&self, chain_id: ChainId, address: &str) -> Option<TokenStats> {
        self.fetch_first(DataKind::TokenStats, address, |p| async move {
            p.get_token_stats(chain_id, address).await
        })
        .await
    }

    /// Conventional market quote from the first provider that has it.
    pub async fn fetch_ticker_quote(&self, ticker: &str) -> Option<TickerQuote> {
        self.fetch_first(DataKind::TickerQuote, ticker, |p| async move {
            p.get_ticker_quote(ticker).await
        })
        .await
    }

    /// Ask capable providers in priority order until one has data.
    ///
    /// `Ok(None)` moves on quietly; errors and timeouts are logged according
    /// to the provider's criticality before moving on.
    async fn fetch_first<T, F, Fut>(&self, kind: DataKind, subject: &str, call: F) -> Option<T>
    where
        F: Fn(Arc<dyn MarketDataProvider>) -> Fut,
        Fut: Future<Output = Result<Option<T>, MarketDataError>>,
    {
        let candidates = self
            .providers
            .iter()
            .filter(|p| p.capabilities().supports(kind));

        for provider in candidates {
            let provider_id: ProviderId = Cow::Borrowed(provider.id());

            let attempt = async {
                let _permit = self.rate_limiter.acquire(&provider_id).await?;
                call(Arc::clone(provider)).await
            };

            let outcome = match tokio::time::timeout(self.call_timeout, attempt).await {
                Ok(result) => result,
                Err(_) => Err(MarketDataError::Timeout {
                    provider: provider_id.to_string(),
                }),
            };

            match outcome {
                Ok(Some(value)) => {
                    debug!("{} for '{}' served by '{}'", kind, subject, provider_id);
                    return Some(value);
                }
                Ok(None) => {
                    debug!("'{}' has no {} for '{}'", provider_id, kind, subject);
                }
                Err(e) => log_failure(provider.criticality(), kind, subject, &e),
            }
        }

        None
    }
}

fn log_failure(
    criticality: ProviderCriticality,
    kind: DataKind,
    subject: &str,
    err: &MarketDataError,
) {
    if err.is_absence() || criticality == ProviderCriticality::Auxiliary {
        debug!("{} lookup for '{}' failed: {}", kind, subject, err);
    } else {
        error!("{} lookup for '{}' failed: {}", kind, subject, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ProviderCapabilities, RateLimit};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy)]
    enum Behavior {
        Value(f64),
        Nothing,
        Fail,
        Hang,
    }

    struct MockProvider {
        id: &'static str,
        priority: u8,
        kinds: &'static [DataKind],
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(id: &'static str, priority: u8, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                id,
                priority,
                kinds: &[DataKind::Liquidity, DataKind::TokenStats],
                behavior,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn answer(&self) -> Result<Option<f64>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Value(v) => Ok(Some(v)),
                Behavior::Nothing => Ok(None),
                Behavior::Fail => Err(MarketDataError::ProviderError {
                    provider: self.id.to_string(),
                    message: "boom".to_string(),
                }),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(None)
                }
            }
        }
    }

    #[async_trait]
    impl MarketDataProvider for MockProvider {
        fn id(&self) -> &'static str {
            self.id
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        fn capabilities(&self) -> ProviderCapabilities {
            ProviderCapabilities {
                data_kinds: self.kinds,
            }
        }

        fn criticality(&self) -> ProviderCriticality {
            ProviderCriticality::Critical
        }

        fn rate_limit(&self) -> RateLimit {
            RateLimit::default()
        }

        async fn get_liquidity(
            &self,
            _chain_id: ChainId,
            _address: &str,
        ) -> Result<Option<f64>, MarketDataError> {
            self.answer().await
        }

        async fn get_token_stats(
            &self,
            _chain_id: ChainId,
            _address: &str,
        ) -> Result<Option<TokenStats>, MarketDataError> {
            Ok(self.answer().await?.map(|v| TokenStats {
                volume_24h_usd: Some(v),
                ..TokenStats::default()
            }))
        }
    }

    fn registry(providers: &[Arc<MockProvider>]) -> ProviderRegistry {
        ProviderRegistry::new(
            providers
                .iter()
                .map(|p| Arc::clone(p) as Arc<dyn MarketDataProvider>)
                .collect(),
        )
    }

    #[test]
    fn test_provider_ordering_by_priority() {
        let registry = registry(&[
            MockProvider::new("LOW", 20, Behavior::Nothing),
            MockProvider::new("HIGH", 1, Behavior::Nothing),
            MockProvider::new("MEDIUM", 10, Behavior::Nothing),
        ]);

        let ids: Vec<_> = registry.providers().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["HIGH", "MEDIUM", "LOW"]);
        assert_eq!(registry.call_timeout(), DEFAULT_CALL_TIMEOUT);
    }

    #[tokio::test]
    async fn test_first_answer_wins() {
        let first = MockProvider::new("FIRST", 1, Behavior::Value(1.0));
        let second = MockProvider::new("SECOND", 2, Behavior::Value(2.0));
        let registry = registry(&[second.clone(), first.clone()]);

        assert_eq!(registry.fetch_liquidity(1, "0xabc").await, Some(1.0));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_falls_through_failures_and_empty_answers() {
        let failing = MockProvider::new("FAILING", 1, Behavior::Fail);
        let empty = MockProvider::new("EMPTY", 2, Behavior::Nothing);
        let good = MockProvider::new("GOOD", 3, Behavior::Value(3.0));
        let registry = registry(&[failing.clone(), empty.clone(), good.clone()]);

        let stats = registry.fetch_token_stats(1, "0xabc").await.unwrap();
        assert_eq!(stats.volume_24h_usd, Some(3.0));
        assert_eq!(failing.calls(), 1);
        assert_eq!(empty.calls(), 1);
        assert_eq!(good.calls(), 1);
    }

    #[tokio::test]
    async fn test_all_providers_failing_yields_none() {
        let registry = registry(&[
            MockProvider::new("A", 1, Behavior::Fail),
            MockProvider::new("B", 2, Behavior::Nothing),
        ]);

        assert_eq!(registry.fetch_liquidity(1, "0xabc").await, None);
    }

    #[tokio::test]
    async fn test_capability_filter_skips_providers() {
        let provider = MockProvider::new("NO_QUOTES", 1, Behavior::Value(1.0));
        let registry = registry(&[provider.clone()]);

        assert!(registry.fetch_ticker_quote("AAPL").await.is_none());
        assert!(registry.fetch_market_cap_display(1, "0xabc").await.is_none());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_providers() {
        let registry = ProviderRegistry::new(Vec::new());
        assert!(registry.fetch_token_stats(1, "0xabc").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_provider_times_out() {
        let hanging = MockProvider::new("HANGING", 1, Behavior::Hang);
        let backup = MockProvider::new("BACKUP", 2, Behavior::Value(5.0));
        let registry =
            registry(&[hanging.clone(), backup.clone()]).with_call_timeout(Duration::from_secs(1));

        assert_eq!(registry.fetch_liquidity(1, "0xabc").await, Some(5.0));
        assert_eq!(hanging.calls(), 1);
        assert_eq!(backup.calls(), 1);
    }
}
