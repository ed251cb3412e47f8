//! Retry with exponential backoff for transient fetch failures

use std::future::Future;
use std::time::Duration;

use crate::ports::FetchError;

/// How often and how patiently to retry a batched fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_retries: u32,
    /// Base delay for exponential backoff
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(base_delay_ms),
        }
    }

    /// Single attempt, no backoff
    pub fn none() -> Self {
        Self {
            max_retries: 1,
            base_delay: Duration::ZERO,
        }
    }

    fn backoff(&self, error: &FetchError, attempt: u32) -> Duration {
        match error {
            // Rate limits back off exponentially, everything else linearly
            FetchError::RateLimited => self.base_delay * 2u32.saturating_pow(attempt + 1),
            _ => self.base_delay * (attempt + 1),
        }
    }

    /// Execute request with retry logic and exponential backoff
    pub async fn run<T, F, Fut>(&self, operation: &str, mut request_fn: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let attempts = self.max_retries.max(1);
        let mut attempt = 0;

        loop {
            match request_fn().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt + 1 < attempts => {
                    let backoff = self.backoff(&e, attempt);
                    tracing::warn!(
                        "{} failed: {}, backing off for {:?} (attempt {}/{})",
                        operation,
                        e,
                        backoff,
                        attempt + 1,
                        attempts
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
