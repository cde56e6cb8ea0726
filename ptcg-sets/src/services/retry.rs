//! Retry with exponential backoff
//!
//! Wraps a single remote call. Retryable failures are attempted again
//! after `base * 2^attempt` (attempt counted from 0), so with the default
//! policy the waits are 1s then 2s before the third and final attempt.
//! Non-retryable failures, and the failure of the last attempt, are
//! returned unchanged.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Bounds for [`retry_with_backoff`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay after the failed attempt number `attempt` (0-based)
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// the policy's attempts are exhausted.
///
/// # Arguments
/// * `operation_name` - Name for logging (e.g., the request URL)
/// * `policy` - Attempt bound and backoff base
/// * `operation` - Closure producing a fresh future per attempt
/// * `is_retryable` - Classifies an error as worth another attempt
pub async fn retry_with_backoff<F, Fut, T, E, R>(
    operation_name: &str,
    policy: &RetryPolicy,
    mut operation: F,
    is_retryable: R,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    R: Fn(&E) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::debug!(operation = operation_name, attempt, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) => {
                if !is_retryable(&err) {
                    return Err(err);
                }

                if attempt + 1 >= max_attempts {
                    tracing::error!(
                        operation = operation_name,
                        attempts = max_attempts,
                        error = %err,
                        "Giving up after exhausting retries"
                    );
                    return Err(err);
                }

                let wait = policy.backoff_delay(attempt);
                tracing::warn!(
                    operation = operation_name,
                    error = %err,
                    "Retry {}/{} after {:?}...",
                    attempt + 1,
                    max_attempts,
                    wait
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
        }
    }
}
