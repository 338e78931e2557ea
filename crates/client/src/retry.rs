use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use backoff::{future::retry, Error as BackoffError, ExponentialBackoff, ExponentialBackoffBuilder};

use crate::errors::Result;

/// Retry policy for idempotent API reads.
///
/// Transient failures (timeouts, connection errors, 429/502/503/504) are
/// retried with exponential backoff; everything else fails immediately.
pub struct RetryStrategy {
    max_retries: u32,
}

impl RetryStrategy {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_secs(1))
            .with_max_interval(Duration::from_secs(30))
            .with_multiplier(2.0)
            .with_max_elapsed_time(Some(Duration::from_secs(300)))
            .build()
    }

    /// Run `op`, retrying it up to `max_retries` times while it fails
    /// with a retryable error
    pub async fn run<T, Fut, F>(&self, op: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let failures = AtomicU32::new(0);
        let max_retries = self.max_retries;

        retry(self.create_backoff(), || {
            let fut = op();
            let failures = &failures;
            async move {
                fut.await.map_err(|e| {
                    let so_far = failures.fetch_add(1, Ordering::Relaxed) + 1;
                    if e.is_retryable() && so_far <= max_retries {
                        tracing::warn!(
                            error = %e,
                            attempt = so_far,
                            max_retries,
                            "Transient API failure, will retry"
                        );
                        BackoffError::transient(e)
                    } else {
                        BackoffError::permanent(e)
                    }
                })
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClientError;

    fn unavailable() -> ClientError {
        ClientError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_failures() {
        let strategy = RetryStrategy::new(3);
        let calls = AtomicU32::new(0);

        let result: Result<u32> = strategy
            .run(|| {
                let n = calls.fetch_add(1, Ordering::Relaxed);
                async move {
                    if n < 2 {
                        Err(unavailable())
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let strategy = RetryStrategy::new(2);
        let calls = AtomicU32::new(0);

        let result: Result<u32> = strategy
            .run(|| {
                calls.fetch_add(1, Ordering::Relaxed);
                async { Err(unavailable()) }
            })
            .await;

        assert!(matches!(
            result,
            Err(ClientError::Api { status: 503, .. })
        ));
        // initial attempt + 2 retries
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_errors_fail_fast() {
        let strategy = RetryStrategy::new(5);
        let calls = AtomicU32::new(0);

        let result: Result<u32> = strategy
            .run(|| {
                calls.fetch_add(1, Ordering::Relaxed);
                async {
                    Err(ClientError::Api {
                        status: 404,
                        message: "missing".to_string(),
                    })
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }
}
