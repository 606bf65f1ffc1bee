use std::time::Duration;

use crate::CrawlError;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Bounded retry with a fixed wait between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            wait: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Policy that never waits; used where attempts should follow each other immediately.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            wait: Duration::ZERO,
        }
    }

    /// Decide whether to run again after `attempt` failed with `err`.
    ///
    /// `attempt` is 1-based (1 = first attempt).
    pub fn decide(&self, attempt: u32, err: &CrawlError) -> RetryDecision {
        if attempt >= self.max_attempts || !err.is_transient() {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.wait)
    }
}
