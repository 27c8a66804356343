//! Transport and request/response engine.
//!
//! Uses the curl crate (libcurl) for TCP, TLS, request framing and body
//! decoding. Redirects are followed here rather than inside libcurl so every
//! hop goes through the URL decomposer and the hop count stays bounded.

mod error;
mod headers;

pub use error::FetchError;
pub use headers::ResponseMeta;

use std::time::Duration;

use crate::config::MycurlConfig;
use crate::url_model::Url;

/// Per-transfer transport settings.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub user_agent: String,
    /// Redirects followed before giving up.
    pub max_redirects: u32,
}

impl FetchOptions {
    pub fn from_config(cfg: &MycurlConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            user_agent: cfg.user_agent.clone(),
            max_redirects: cfg.max_redirects,
        }
    }
}

/// Final response of a transfer.
#[derive(Debug, Clone)]
pub struct Response {
    /// URL that produced the body (after redirects).
    pub url: Url,
    pub meta: ResponseMeta,
    pub body: Vec<u8>,
    /// Number of redirects followed.
    pub redirects: u32,
}

/// Status codes that carry a `Location` to follow.
pub fn is_redirect(status: u32) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// GETs `url`, following up to `opts.max_redirects` redirects.
///
/// Only a 2xx final response is returned as `Ok`. Runs in the current thread.
pub fn fetch(url: &Url, opts: &FetchOptions) -> Result<Response, FetchError> {
    let mut current = url.clone();
    let mut redirects = 0u32;

    loop {
        let (meta, body) = fetch_once(&current, opts)?;

        if is_redirect(meta.status) {
            let location = meta
                .location
                .as_deref()
                .ok_or(FetchError::MissingLocation(meta.status))?;
            if redirects >= opts.max_redirects {
                return Err(FetchError::TooManyRedirects(opts.max_redirects));
            }
            let next = current.resolve(location)?;
            tracing::info!(status = meta.status, from = %current, to = %next, "following redirect");
            redirects += 1;
            current = next;
            continue;
        }

        if !(200..300).contains(&meta.status) {
            return Err(FetchError::Http(meta.status));
        }

        if !meta.length_matches(body.len()) {
            tracing::warn!(
                url = %current,
                content_length = meta.content_length,
                bytes = body.len(),
                "body length differs from Content-Length"
            );
        }
        tracing::debug!(
            url = %current,
            status = meta.status,
            content_length = meta.content_length,
            bytes = body.len(),
            redirects,
            "transfer complete"
        );
        return Ok(Response {
            url: current,
            meta,
            body,
            redirects,
        });
    }
}

/// One GET without redirect handling. Returns whatever status the server sent.
pub fn fetch_once(url: &Url, opts: &FetchOptions) -> Result<(ResponseMeta, Vec<u8>), FetchError> {
    let mut header_lines: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(&url.to_string())?;
    easy.get(true)?;
    easy.follow_location(false)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    easy.useragent(&opts.user_agent)?;

    tracing::debug!(
        scheme = %url.scheme,
        host = url.connect_host(),
        port = %url.port,
        default_port = url.is_default_port(),
        path = %url.path,
        tls = url.scheme.is_secure(),
        "GET"
    );

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            header_lines.push(headers::header_line(data));
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let mut meta = headers::parse_headers(&header_lines);
    meta.status = easy.response_code()?;
    Ok((meta, body))
}
