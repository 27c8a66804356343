//! Retry and backoff policy for whole transfers.
//!
//! Transient transport failures (timeouts, connection resets, throttling,
//! 5xx) are retried with capped exponential backoff; anything else is
//! returned on the first failure.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
