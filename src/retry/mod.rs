//! Exponential-backoff retry wrapper for fallible async operations.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

const MAX_RETRIES: u32 = 3;

/// Stateless, reusable retry policy: 3 retries after the initial attempt (4
/// invocations total max), `backoff(n) = 2^n` seconds between attempts, where
/// `n` is the 1-based retry index. Any error is retryable at this layer; on
/// the final failure the original error propagates to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryPolicy;

impl RetryPolicy {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute<F, Fut, T, E>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempt >= MAX_RETRIES {
                        return Err(err);
                    }
                    attempt += 1;
                    let delay = Duration::from_secs(2u64.pow(attempt));
                    warn!(attempt, delay_secs = delay.as_secs(), error = %err, "retrying after gateway failure");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
