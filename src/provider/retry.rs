// src/provider/retry.rs — Retry with exponential backoff for model providers
//
// Retries: rate limits (429), server errors (5xx), timeouts, connection resets.
// Does NOT retry: bad request (400), auth errors (401, 403), budget failures.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse, ModelProvider};
use crate::infra::errors::EnhancerError;

const MAX_RETRIES: u32 = 2;
const INITIAL_DELAY_MS: u64 = 500;
const BACKOFF_FACTOR: f64 = 2.0;
const MAX_DELAY_MS: u64 = 8_000;
const JITTER_FRACTION: f64 = 0.25;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub backoff_factor: f64,
    pub max_delay: Duration,
    pub jitter_fraction: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            initial_delay: Duration::from_millis(INITIAL_DELAY_MS),
            backoff_factor: BACKOFF_FACTOR,
            max_delay: Duration::from_millis(MAX_DELAY_MS),
            jitter_fraction: JITTER_FRACTION,
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }
}

/// A provider wrapper that retries `chat()` on transient errors.
pub struct RetryProvider {
    inner: Arc<dyn ModelProvider>,
    config: RetryConfig,
}

impl RetryProvider {
    pub fn new(inner: Arc<dyn ModelProvider>) -> Self {
        Self {
            inner,
            config: RetryConfig::default(),
        }
    }

    pub fn with_config(inner: Arc<dyn ModelProvider>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// Calculate the delay for a given retry attempt (0-indexed).
    fn delay_for_attempt(&self, attempt: u32, rate_limit_delay: Option<Duration>) -> Duration {
        if let Some(rl_delay) = rate_limit_delay {
            return rl_delay + Duration::from_millis(100);
        }

        let base_ms = self.config.initial_delay.as_millis() as f64
            * self.config.backoff_factor.powi(attempt as i32);
        let capped_ms = base_ms.min(self.config.max_delay.as_millis() as f64);

        let jitter = deterministic_jitter(attempt, self.config.jitter_fraction);
        let final_ms = (capped_ms * jitter).max(100.0);

        Duration::from_millis(final_ms as u64)
    }
}

fn should_retry(error: &EnhancerError) -> bool {
    error.is_retriable()
}

/// Extract rate-limit retry delay from the error, if available.
fn rate_limit_delay(error: &EnhancerError) -> Option<Duration> {
    match error {
        EnhancerError::RateLimited { retry_after_ms, .. } if *retry_after_ms > 0 => {
            Some(Duration::from_millis(*retry_after_ms))
        }
        _ => None,
    }
}

/// Multiplier in [1 - fraction, 1 + fraction], stable per attempt.
fn deterministic_jitter(attempt: u32, fraction: f64) -> f64 {
    let hash = (attempt.wrapping_mul(2654435761)) as f64 / u32::MAX as f64;
    1.0 + fraction * (2.0 * hash - 1.0)
}

#[async_trait]
impl ModelProvider for RetryProvider {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, EnhancerError> {
        let mut attempt = 0;
        loop {
            match self.inner.chat(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if !should_retry(&e) || attempt >= self.config.max_retries {
                        return Err(e);
                    }

                    let delay = self.delay_for_attempt(attempt, rate_limit_delay(&e));

                    tracing::warn!(
                        provider = self.inner.id(),
                        attempt = attempt + 1,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying after error: {}",
                        e
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{StopReason, TokenUsage};
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_should_retry_rate_limited() {
        let err = EnhancerError::RateLimited {
            provider: "test".into(),
            retry_after_ms: 5000,
        };
        assert!(should_retry(&err));
    }

    #[test]
    fn test_should_retry_retriable_provider() {
        let err = EnhancerError::Provider {
            provider: "test".into(),
            message: "HTTP 500".into(),
            retriable: true,
        };
        assert!(should_retry(&err));
    }

    #[test]
    fn test_should_not_retry_bad_request() {
        let err = EnhancerError::Provider {
            provider: "test".into(),
            message: "HTTP 400 bad request".into(),
            retriable: false,
        };
        assert!(!should_retry(&err));
    }

    #[test]
    fn test_should_not_retry_missing_key() {
        assert!(!should_retry(&EnhancerError::MissingApiKey));
    }

    #[test]
    fn test_rate_limit_delay_extraction() {
        let err = EnhancerError::RateLimited {
            provider: "test".into(),
            retry_after_ms: 3000,
        };
        assert_eq!(rate_limit_delay(&err), Some(Duration::from_millis(3000)));
    }

    #[test]
    fn test_rate_limit_delay_zero() {
        let err = EnhancerError::RateLimited {
            provider: "test".into(),
            retry_after_ms: 0,
        };
        assert!(rate_limit_delay(&err).is_none());
    }

    #[test]
    fn test_delay_for_attempt_exponential() {
        let provider = RetryProvider::new(Arc::new(FlakyProvider::new(0)));
        let d0 = provider.delay_for_attempt(0, None);
        let d1 = provider.delay_for_attempt(1, None);
        let d2 = provider.delay_for_attempt(2, None);

        // d0 ≈ 500ms, d1 ≈ 1000ms, d2 ≈ 2000ms (±25%)
        assert!(d0.as_millis() >= 375 && d0.as_millis() <= 625);
        assert!(d1.as_millis() >= 750 && d1.as_millis() <= 1250);
        assert!(d2.as_millis() >= 1500 && d2.as_millis() <= 2500);
    }

    #[test]
    fn test_delay_capped_at_max() {
        let provider = RetryProvider::new(Arc::new(FlakyProvider::new(0)));
        let d = provider.delay_for_attempt(10, None);
        assert!(d.as_millis() <= 10_000);
    }

    #[test]
    fn test_delay_uses_rate_limit_hint() {
        let provider = RetryProvider::new(Arc::new(FlakyProvider::new(0)));
        let d = provider.delay_for_attempt(0, Some(Duration::from_millis(10_000)));
        assert_eq!(d.as_millis(), 10_100);
    }

    #[test]
    fn test_deterministic_jitter_range() {
        for attempt in 0..20 {
            let j = deterministic_jitter(attempt, 0.25);
            assert!(
                (0.75..=1.25).contains(&j),
                "jitter {} out of range for attempt {}",
                j,
                attempt
            );
        }
    }

    #[test]
    fn test_default_config() {
        let cfg = RetryConfig::default();
        assert_eq!(cfg.max_retries, 2);
        assert_eq!(cfg.initial_delay, Duration::from_millis(500));
        assert_eq!(cfg.max_delay, Duration::from_millis(8000));
    }

    fn fast_config(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            initial_delay: Duration::from_millis(1),
            backoff_factor: 1.0,
            max_delay: Duration::from_millis(1),
            jitter_fraction: 0.0,
        }
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let inner = Arc::new(FlakyProvider::new(2));
        let provider = RetryProvider::with_config(inner.clone(), fast_config(2));
        let resp = provider.chat(ChatRequest::default()).await.unwrap();
        assert_eq!(resp.content, "ok");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let inner = Arc::new(FlakyProvider::new(5));
        let provider = RetryProvider::with_config(inner.clone(), fast_config(1));
        let err = provider.chat(ChatRequest::default()).await.unwrap_err();
        assert!(err.is_retriable());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_retries_calls_once() {
        let inner = Arc::new(FlakyProvider::new(1));
        let provider = RetryProvider::with_config(inner.clone(), fast_config(0));
        assert!(provider.chat(ChatRequest::default()).await.is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    /// Fails with a retriable error for the first `failures` calls.
    struct FlakyProvider {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyProvider {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl ModelProvider for FlakyProvider {
        fn id(&self) -> &str {
            "flaky"
        }
        fn name(&self) -> &str {
            "Flaky"
        }
        async fn chat(&self, _req: ChatRequest) -> Result<ChatResponse, EnhancerError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                return Err(EnhancerError::Provider {
                    provider: "flaky".into(),
                    message: "HTTP 529 overloaded".into(),
                    retriable: true,
                });
            }
            Ok(ChatResponse {
                content: "ok".into(),
                usage: TokenUsage::default(),
                stop_reason: StopReason::EndTurn,
            })
        }
    }
}
