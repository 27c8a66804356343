//! Human-readable transfer output: the banner printed before a transfer and
//! the timing/throughput line printed after it.

use chrono::NaiveDateTime;
use std::fmt;
use std::time::Duration;

use crate::output::OutputTarget;
use crate::url_model::Url;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `Protocol: http, Host h, port = 80, path = /, Output: f`
pub struct Banner<'a> {
    pub url: &'a Url,
    pub output: &'a OutputTarget,
}

impl fmt::Display for Banner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Protocol: {}, Host {}, port = {}, path = {}, Output: {}",
            self.url.scheme, self.url.host, self.url.port, self.url.path, self.output
        )
    }
}

/// Outcome of one transfer.
#[derive(Debug, Clone)]
pub struct TransferReport {
    /// Local wall-clock time when the transfer finished.
    pub finished_at: NaiveDateTime,
    /// URL as the user typed it.
    pub raw_url: String,
    /// URL the body came from (after redirects).
    pub final_url: Url,
    pub bytes: u64,
    pub elapsed: Duration,
    pub redirects: u32,
    pub from_cache: bool,
}

impl TransferReport {
    /// Throughput in megabits per second; 0 when no time elapsed.
    pub fn mbps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        (8.0 * self.bytes as f64 / secs) / 1e6
    }
}

/// `2024-01-02 03:04:05 <url> <n> [bytes] <s> [s] <mbps> [Mbps]`
impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [bytes] {:.6} [s] {:.6} [Mbps]",
            self.finished_at.format(TIMESTAMP_FORMAT),
            self.raw_url,
            self.bytes,
            self.elapsed.as_secs_f64(),
            self.mbps()
        )
    }
}
