// ABOUTME: Retry loop for transient provider overload
// ABOUTME: Linear backoff (2s, 4s, ...) with a hard cap on total attempts

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::AIServiceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first call
    pub max_attempts: u32,
    /// Delay after the first failure; the n-th retry waits `n * base_delay`
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// No sleeping between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay before the attempt following failed attempt number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error,
/// or `policy.max_attempts` calls have been made.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> AIServiceResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AIServiceResult<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= max_attempts || !err.category().is_retryable() {
                    return Err(err);
                }

                let delay = policy.delay_for(attempt);
                warn!(
                    "{} overloaded on attempt {}/{}: {}. Retrying in {:?}",
                    label, attempt, max_attempts, err, delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
