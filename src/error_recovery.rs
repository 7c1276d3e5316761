// src/error_recovery.rs
//! Retry with exponential backoff for listing calls.

use crate::error::ConvertError;
use rand::Rng;
use std::time::Duration;

/// Retries an async operation with capped exponential backoff and jitter.
///
/// Only errors that classify as retryable (rate limits, 5xx, transport
/// timeouts) are retried; everything else surfaces immediately.
pub async fn retry_with_backoff<F, T, Fut>(
    mut operation: F,
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
) -> Result<T, ConvertError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, ConvertError>>,
{
    let mut delay = initial_delay;
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                last_error = Some(e);

                if attempt < max_attempts {
                    let jitter = rand::rng().random_range(Duration::ZERO..=delay / 4);
                    log::warn!(
                        "Attempt {} failed, retrying after {:?}",
                        attempt,
                        delay + jitter
                    );
                    tokio::time::sleep(delay + jitter).await;
                    delay = std::cmp::min(delay * 2, max_delay);
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| ConvertError::Internal {
        message: "Retry failed with no error".to_string(),
        source: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorCode;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient() -> ConvertError {
        ConvertError::Api {
            code: ApiErrorCode::ServiceUnavailable,
            message: "unavailable".to_string(),
        }
    }

    fn permanent() -> ConvertError {
        ConvertError::Api {
            code: ApiErrorCode::ObjectNotFound,
            message: "gone".to_string(),
        }
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff(
            || async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(transient())
                } else {
                    Ok(42)
                }
            },
            3,
            Duration::from_millis(1),
            Duration::from_millis(4),
        )
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_failures_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_with_backoff(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(permanent())
            },
            5,
            Duration::from_millis(1),
            Duration::from_millis(4),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausted_retries_surface_last_error() {
        let result: Result<(), _> = retry_with_backoff(
            || async { Err(transient()) },
            2,
            Duration::from_millis(1),
            Duration::from_millis(2),
        )
        .await;
        assert!(matches!(
            result,
            Err(ConvertError::Api {
                code: ApiErrorCode::ServiceUnavailable,
                ..
            })
        ));
    }
}
