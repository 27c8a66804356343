//! Failure of a single transfer (one request, or one redirect chain).

use std::fmt;

use crate::url_model::UrlError;

/// Error returned by the request engine.
/// Kept typed so the retry layer can classify it before converting to anyhow.
#[derive(Debug)]
pub enum FetchError {
    /// A redirect `Location` did not decompose into a supported URL.
    Url(UrlError),
    /// Curl reported an error (timeout, connection, TLS, etc.).
    Curl(curl::Error),
    /// Final response had a non-2xx status.
    Http(u32),
    /// Redirect chain exceeded the configured bound.
    TooManyRedirects(u32),
    /// Redirect status without a `Location` header.
    MissingLocation(u32),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Url(e) => write!(f, "redirect target: {}", e),
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
            FetchError::TooManyRedirects(max) => {
                write!(f, "too many redirects (max {})", max)
            }
            FetchError::MissingLocation(code) => {
                write!(f, "HTTP {} redirect without Location header", code)
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Url(e) => Some(e),
            FetchError::Curl(e) => Some(e),
            FetchError::Http(_) | FetchError::TooManyRedirects(_) | FetchError::MissingLocation(_) => {
                None
            }
        }
    }
}

impl From<UrlError> for FetchError {
    fn from(e: UrlError) -> Self {
        FetchError::Url(e)
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Curl(e)
    }
}
