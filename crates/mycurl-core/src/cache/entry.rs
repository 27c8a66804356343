//! Cache entry types.

use serde::{Deserialize, Serialize};

use crate::fetch::Response;
use crate::url_model::{self, Url, UrlError};

/// Metadata stored next to a cached body (`<key>.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMeta {
    /// Canonical rendering of the requested URL.
    pub url: String,
    /// Canonical rendering of the URL the body came from, after redirects.
    pub final_url: String,
    pub status: u32,
    /// Redirects followed when the entry was fetched.
    #[serde(default)]
    pub redirects: u32,
    #[serde(default)]
    pub content_type: Option<String>,
    pub body_len: u64,
    /// Unix seconds at which the entry was written.
    pub stored_at: i64,
}

impl CacheMeta {
    pub(crate) fn from_response(url: &Url, response: &Response) -> Self {
        Self {
            url: url.to_string(),
            final_url: response.url.to_string(),
            status: response.meta.status,
            redirects: response.redirects,
            content_type: response.meta.content_type.clone(),
            body_len: response.body.len() as u64,
            stored_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// A cache hit.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub meta: CacheMeta,
    pub body: Vec<u8>,
}

impl CachedResponse {
    /// Re-decomposes the stored final URL.
    pub fn final_url(&self) -> Result<Url, UrlError> {
        url_model::parse(&self.meta.final_url)
    }
}
