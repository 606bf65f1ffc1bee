//! Whole-run retry policy.
//!
//! Only transient crawl errors (today's wallpaper not published yet) are
//! retried; every other error propagates on the first attempt.

mod policy;
mod run;

pub use policy::{RetryDecision, RetryPolicy};
pub use run::run_with_retry;
