//! Bar source adapter.
//!
//! Hides the two upstream providers behind one `fetch_bars` call that never
//! fails: any upstream problem shows up to the caller as zero bars.

use crate::sources::BarProvider;
use crate::types::{Bar, CurrencyPair, TimeframeSource, TimeframeSpec};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Anything that can turn a pair and timeframe into ascending bars.
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Bars in ascending time order, or empty when nothing is available.
    async fn fetch_bars(&self, pair: &CurrencyPair, spec: &TimeframeSpec) -> Vec<Bar>;
}

/// How often an empty result set is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    /// Delay before each retry.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_millis(700),
        }
    }
}

/// Routes aggregates timeframes to one provider and intraday timeframes to another.
pub struct MarketDataAdapter {
    aggregates: Arc<dyn BarProvider>,
    intraday: Arc<dyn BarProvider>,
    retry: RetryPolicy,
}

impl MarketDataAdapter {
    pub fn new(
        aggregates: Arc<dyn BarProvider>,
        intraday: Arc<dyn BarProvider>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            aggregates,
            intraday,
            retry,
        }
    }

    fn provider_for(&self, spec: &TimeframeSpec) -> &Arc<dyn BarProvider> {
        match spec.source {
            TimeframeSource::Aggregates { .. } => &self.aggregates,
            TimeframeSource::Intraday { .. } => &self.intraday,
        }
    }
}

#[async_trait]
impl BarSource for MarketDataAdapter {
    async fn fetch_bars(&self, pair: &CurrencyPair, spec: &TimeframeSpec) -> Vec<Bar> {
        let provider = self.provider_for(spec);
        let attempts = self.retry.max_attempts.max(1);

        for attempt in 1..=attempts {
            match provider.fetch(pair, spec).await {
                Ok(bars) if !bars.is_empty() => {
                    debug!(
                        "{} returned {} bars for {} {} (attempt {})",
                        provider.name(),
                        bars.len(),
                        pair,
                        spec.label,
                        attempt
                    );
                    return bars;
                }
                Ok(_) => {
                    debug!(
                        "{} returned no bars for {} {} (attempt {}/{})",
                        provider.name(),
                        pair,
                        spec.label,
                        attempt,
                        attempts
                    );
                    if attempt < attempts {
                        tokio::time::sleep(self.retry.backoff).await;
                    }
                }
                Err(e) => {
                    // Request-level failures are not retried.
                    warn!(
                        "{} fetch failed for {} {}: {}",
                        provider.name(),
                        pair,
                        spec.label,
                        e
                    );
                    return Vec::new();
                }
            }
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Instant;

    /// Replays a fixed script of responses, then keeps returning empty.
    struct ScriptedProvider {
        script: Mutex<Vec<Result<Vec<Bar>>>>,
        calls: AtomicUsize,
        called_at: Mutex<Vec<Instant>>,
    }

    impl ScriptedProvider {
        fn new(mut script: Vec<Result<Vec<Bar>>>) -> Arc<Self> {
            script.reverse();
            Arc::new(Self {
                script: Mutex::new(script),
                calls: AtomicUsize::new(0),
                called_at: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BarProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn fetch(&self, _pair: &CurrencyPair, _spec: &TimeframeSpec) -> Result<Vec<Bar>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.called_at.lock().unwrap().push(Instant::now());
            let next = self.script.lock().unwrap().pop();
            next.unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn bars(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| Bar::new(i as i64 * 1000, 1.0, 1.0, 1.0, 1.0))
            .collect()
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 2,
            backoff: Duration::ZERO,
        }
    }

    fn pair() -> CurrencyPair {
        CurrencyPair::parse("EURUSD").unwrap()
    }

    #[test]
    fn test_default_policy_is_one_retry() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.backoff, Duration::from_millis(700));
    }

    #[test]
    fn test_routes_by_source_kind() {
        let aggregates = ScriptedProvider::new(vec![Ok(bars(3))]);
        let intraday = ScriptedProvider::new(vec![Ok(bars(5))]);
        let adapter = MarketDataAdapter::new(aggregates.clone(), intraday.clone(), fast_retry());

        let daily = tokio_test::block_on(adapter.fetch_bars(&pair(), &TimeframeSpec::daily()));
        let hourly =
            tokio_test::block_on(adapter.fetch_bars(&pair(), &TimeframeSpec::one_hour(500)));

        assert_eq!(daily.len(), 3);
        assert_eq!(hourly.len(), 5);
        assert_eq!(aggregates.calls(), 1);
        assert_eq!(intraday.calls(), 1);
    }

    #[tokio::test]
    async fn test_retries_once_after_empty() {
        let provider = ScriptedProvider::new(vec![Ok(Vec::new()), Ok(bars(4))]);
        let adapter = MarketDataAdapter::new(provider.clone(), provider.clone(), fast_retry());

        let result = adapter.fetch_bars(&pair(), &TimeframeSpec::weekly()).await;
        assert_eq!(result.len(), 4);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let provider = ScriptedProvider::new(vec![Ok(Vec::new()), Ok(Vec::new()), Ok(bars(4))]);
        let adapter = MarketDataAdapter::new(provider.clone(), provider.clone(), fast_retry());

        let result = adapter.fetch_bars(&pair(), &TimeframeSpec::weekly()).await;
        assert!(result.is_empty());
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_errors_are_swallowed_without_retry() {
        let provider = ScriptedProvider::new(vec![
            Err(AppError::ExternalApi("503".to_string())),
            Ok(bars(4)),
        ]);
        let adapter = MarketDataAdapter::new(provider.clone(), provider.clone(), fast_retry());

        let result = adapter.fetch_bars(&pair(), &TimeframeSpec::daily()).await;
        assert!(result.is_empty());
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let provider = ScriptedProvider::new(vec![Ok(bars(1))]);
        let policy = RetryPolicy {
            max_attempts: 0,
            backoff: Duration::ZERO,
        };
        let adapter = MarketDataAdapter::new(provider.clone(), provider.clone(), policy);

        assert_eq!(adapter.fetch_bars(&pair(), &TimeframeSpec::daily()).await.len(), 1);
    }

    #[tokio::test]
    async fn test_backoff_before_retry() {
        let backoff = Duration::from_millis(50);
        let provider = ScriptedProvider::new(vec![Ok(Vec::new()), Ok(bars(2))]);
        let policy = RetryPolicy {
            max_attempts: 2,
            backoff,
        };
        let adapter = MarketDataAdapter::new(provider.clone(), provider.clone(), policy);

        let result = adapter.fetch_bars(&pair(), &TimeframeSpec::daily()).await;
        assert_eq!(result.len(), 2);

        let called_at = provider.called_at.lock().unwrap().clone();
        assert_eq!(called_at.len(), 2);
        assert!(called_at[1].duration_since(called_at[0]) >= backoff);
    }

    #[tokio::test]
    async fn test_no_backoff_after_last_attempt() {
        let backoff = Duration::from_millis(200);
        let provider = ScriptedProvider::new(vec![Ok(Vec::new())]);
        let policy = RetryPolicy {
            max_attempts: 1,
            backoff,
        };
        let adapter = MarketDataAdapter::new(provider.clone(), provider.clone(), policy);

        let started = Instant::now();
        assert!(adapter.fetch_bars(&pair(), &TimeframeSpec::daily()).await.is_empty());
        assert!(started.elapsed() < backoff);
        assert_eq!(provider.calls(), 1);
    }
}
