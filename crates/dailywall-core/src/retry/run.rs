//! Retry loop: run an async operation until success or the policy says stop.

use std::future::Future;

use super::policy::{RetryDecision, RetryPolicy};
use crate::CrawlError;

/// Runs `f` until it succeeds or the retry policy says to stop.
/// On a retryable failure, sleeps for the policy's wait then tries again.
/// `f` receives the 1-based attempt number.
pub async fn run_with_retry<T, F, Fut>(policy: &RetryPolicy, mut f: F) -> Result<T, CrawlError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, CrawlError>>,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt).await {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt, &e) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(d) => {
                    tracing::warn!(attempt, wait_secs = d.as_secs_f64(), "{}; retrying", e);
                    tokio::time::sleep(d).await;
                    attempt += 1;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::Cell;

    fn not_updated() -> CrawlError {
        CrawlError::NotYetUpdated(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
    }

    #[tokio::test]
    async fn stops_after_max_attempts() {
        let calls = Cell::new(0u32);
        let policy = RetryPolicy::immediate(3);
        let r: Result<(), _> = run_with_retry(&policy, |_| {
            calls.set(calls.get() + 1);
            async { Err(not_updated()) }
        })
        .await;
        assert!(matches!(r, Err(CrawlError::NotYetUpdated(_))));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn fatal_error_not_retried() {
        let calls = Cell::new(0u32);
        let policy = RetryPolicy::immediate(3);
        let r: Result<(), _> = run_with_retry(&policy, |_| {
            calls.set(calls.get() + 1);
            async { Err(CrawlError::Transport("HTTP 500".into())) }
        })
        .await;
        assert!(matches!(r, Err(CrawlError::Transport(_))));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn succeeds_on_second_attempt() {
        let policy = RetryPolicy::immediate(3);
        let r = run_with_retry(&policy, |attempt| async move {
            if attempt < 2 {
                Err(not_updated())
            } else {
                Ok(attempt)
            }
        })
        .await;
        assert_eq!(r.unwrap(), 2);
    }
}
