//! Failure taxonomy for URL decomposition.

use thiserror::Error;

/// Why a raw URL string could not be decomposed.
///
/// Every variant is a complete failure; the decomposer never hands back a
/// partially filled record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// No `://` between scheme and the rest of the URL.
    #[error("invalid URL: missing '://'")]
    MissingSeparator,
    /// Scheme other than `http` or `https` (lower-cased as seen).
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
    /// A host starting with `[` has no closing `]`.
    #[error("invalid URL: missing closing ']' for IPv6 address")]
    UnterminatedIpv6,
    /// Nothing between `://` and the port or path.
    #[error("invalid URL: empty host")]
    EmptyHost,
    /// Port contains something other than ASCII digits.
    #[error("invalid port: {0}")]
    InvalidPort(String),
}
