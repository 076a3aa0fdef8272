//! Retry with exponential backoff and jitter.
//!
//! Wraps any zero-argument async operation. Every error is retried until the
//! attempt budget (`max_retries + 1`) is spent, then the last error is
//! returned to the caller.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::{error, info, warn};

use crate::constants::{JITTER_MAX, JITTER_MIN, MAX_BACKOFF_SECS};

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Retry configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each following one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub const fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Backoff before jitter for a zero-based retry index:
    /// `min(base * 2^attempt, 15s)`
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = (self.base_delay.as_secs_f64() * 2f64.powi(exponent)).min(MAX_BACKOFF_SECS);
        Duration::from_secs_f64(secs)
    }

    /// Backoff plus a uniform 20-50% jitter
    pub fn jittered_delay(&self, attempt: u32) -> Duration {
        let delay = self.delay_for_attempt(attempt);
        let fraction = rand::rng().random_range(JITTER_MIN..=JITTER_MAX);
        delay + delay.mul_f64(fraction)
    }
}

/// Label used when logging a failed attempt. Has no effect on control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RateLimit,
    Api,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimit => f.write_str("rate limit"),
            Self::Api => f.write_str("API error"),
        }
    }
}

/// Anything mentioning "429" or "rate" (any case) counts as rate limiting
pub fn classify_failure(message: &str) -> FailureKind {
    if message.contains("429") || message.to_lowercase().contains("rate") {
        FailureKind::RateLimit
    } else {
        FailureKind::Api
    }
}

/// Run `operation` until it succeeds or the policy's attempt budget is spent.
///
/// Waits between attempts with `tokio::time::sleep`, so only the calling task
/// is suspended.
///
/// # Example
/// ```ignore
/// let body = retry_with_backoff(&RetryPolicy::default(), || async {
///     client.get(url).send().await?.error_for_status()?.text().await
/// })
/// .await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        if attempt > 1 {
            info!("Retrying API call (attempt {}/{})", attempt, max_attempts);
        }

        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= max_attempts {
                    error!(error = %err, "All {} attempts failed", max_attempts);
                    return Err(err);
                }

                let delay = policy.jittered_delay(attempt - 1);
                let kind = classify_failure(&err.to_string());
                warn!(
                    attempt,
                    error = %err,
                    "API {} detected. Retrying in {:.1}s",
                    kind,
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::from_millis(1))
    }

    /// Fails the first `failures` calls, then returns the call number
    fn flaky(
        calls: &Arc<AtomicU32>,
        failures: u32,
    ) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<u32, String>> + Send>> {
        let calls = Arc::clone(calls);
        move || {
            let calls = Arc::clone(&calls);
            Box::pin(async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n <= failures {
                    Err(format!("failure {n}"))
                } else {
                    Ok(n)
                }
            })
        }
    }

    #[test]
    fn test_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
        assert_eq!(policy.max_attempts(), 4);
    }

    #[test]
    fn test_delay_doubles() {
        let policy = RetryPolicy::new(5, Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(8));
    }

    #[test]
    fn test_delay_capped_at_fifteen_seconds() {
        let policy = RetryPolicy::new(10, Duration::from_secs(3));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(15));
        assert_eq!(policy.delay_for_attempt(40), Duration::from_secs(15));
        assert_eq!(policy.delay_for_attempt(u32::MAX), Duration::from_secs(15));
    }

    #[test]
    fn test_zero_base_delay_never_waits() {
        let policy = RetryPolicy::new(3, Duration::ZERO);
        assert_eq!(policy.jittered_delay(100), Duration::ZERO);
    }

    #[test]
    fn test_jitter_within_bounds() {
        let policy = RetryPolicy::default();
        for attempt in 0..8 {
            let base = policy.delay_for_attempt(attempt);
            for _ in 0..50 {
                let delay = policy.jittered_delay(attempt);
                assert!(delay >= base.mul_f64(1.2) - Duration::from_nanos(1));
                assert!(delay <= base.mul_f64(1.5) + Duration::from_nanos(1));
                assert!(delay <= Duration::from_secs_f64(15.0 * 1.5) + Duration::from_nanos(1));
            }
        }
    }

    #[test]
    fn test_classify_failure() {
        assert_eq!(
            classify_failure("Request failed with status: 429 Too Many Requests"),
            FailureKind::RateLimit
        );
        assert_eq!(classify_failure("Rate limit exceeded"), FailureKind::RateLimit);
        assert_eq!(classify_failure("RATE LIMITED"), FailureKind::RateLimit);
        assert_eq!(classify_failure("operation timed out"), FailureKind::Api);
        assert_eq!(FailureKind::RateLimit.to_string(), "rate limit");
        assert_eq!(FailureKind::Api.to_string(), "API error");
    }

    #[tokio::test]
    async fn test_immediate_success_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let result = retry_with_backoff(&fast_policy(3), flaky(&calls, 0)).await;
        assert_eq!(result, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_failures() {
        for failures in 1..=3 {
            let calls = Arc::new(AtomicU32::new(0));
            let result = retry_with_backoff(&fast_policy(3), flaky(&calls, failures)).await;
            assert_eq!(result, Ok(failures + 1));
            assert_eq!(calls.load(Ordering::SeqCst), failures + 1);
        }
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let result = retry_with_backoff(&fast_policy(3), flaky(&calls, u32::MAX)).await;
        assert_eq!(result, Err("failure 4".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_zero_retries_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let result = retry_with_backoff(&fast_policy(0), flaky(&calls, u32::MAX)).await;
        assert_eq!(result, Err("failure 1".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_waits_between_attempts() {
        let policy = RetryPolicy::new(2, Duration::from_millis(10));
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let result = retry_with_backoff(&policy, flaky(&calls, u32::MAX)).await;

        assert!(result.is_err());
        // 10ms and 20ms backoffs, each with at least 20% jitter
        assert!(start.elapsed() >= Duration::from_millis(36));
    }
}
