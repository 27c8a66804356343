//! URL modeling for the two schemes mycurl speaks.
//!
//! A raw URL string is split into scheme, host, port and path by explicit
//! character scanning (see [`parse`]). The resulting [`Url`] is a plain value
//! consumed by the transport, the response cache and the reporter.

mod error;
mod parse;
mod resolve;

use std::fmt;

pub use error::UrlError;
pub use parse::parse;

/// Supported URL schemes. Matching on input is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Match a scheme candidate, ignoring ASCII case.
    pub fn from_candidate(candidate: &str) -> Result<Self, UrlError> {
        let lower = candidate.to_ascii_lowercase();
        match lower.as_str() {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            _ => Err(UrlError::UnsupportedScheme(lower)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Port implied by the scheme when the URL names none.
    pub fn default_port(self) -> &'static str {
        match self {
            Scheme::Http => "80",
            Scheme::Https => "443",
        }
    }

    /// True when a TLS session must be negotiated before the request.
    pub fn is_secure(self) -> bool {
        matches!(self, Scheme::Https)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decomposed URL.
///
/// - `host` is a bare hostname / IPv4 literal, or a bracketed IPv6 literal
///   including its brackets. Never empty.
/// - `port` is all ASCII digits. No range check is applied here; an
///   out-of-range port fails at connect time.
/// - `path` always starts with `/` and is `/` at minimum. Query strings and
///   fragments are not split off and stay in the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url {
    pub scheme: Scheme,
    pub host: String,
    pub port: String,
    pub path: String,
}

impl Url {
    /// Host as a connection API wants it: IPv6 brackets stripped.
    pub fn connect_host(&self) -> &str {
        self.host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(&self.host)
    }

    pub fn is_default_port(&self) -> bool {
        self.port == self.scheme.default_port()
    }
}

/// Renders `scheme://host:port/path`. The port is always explicit, so the
/// output parses back to the same record.
impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}{}", self.scheme, self.host, self.port, self.path)
    }
}
