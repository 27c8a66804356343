//! One invocation of the client: decompose the URL, then fetch (or read from
//! cache), write the body and measure.

use anyhow::{Context, Result};
use std::time::Instant;

use crate::cache::ResponseCache;
use crate::config::MycurlConfig;
use crate::fetch::{self, FetchOptions};
use crate::output::OutputTarget;
use crate::report::{Banner, TransferReport};
use crate::retry::run_with_retry;
use crate::url_model::{self, Url, UrlError};

/// What the user asked for.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub raw_url: String,
    pub output: OutputTarget,
    pub use_cache: bool,
}

/// A request whose URL decomposed successfully.
#[derive(Debug, Clone)]
pub struct Transfer {
    request: TransferRequest,
    url: Url,
}

impl Transfer {
    /// Decomposes the request URL. Nothing else happens on failure.
    pub fn new(request: TransferRequest) -> Result<Self, UrlError> {
        let url = url_model::parse(&request.raw_url)?;
        Ok(Self { request, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn banner(&self) -> Banner<'_> {
        Banner {
            url: &self.url,
            output: &self.request.output,
        }
    }

    /// Fetches the body (from cache when enabled and present), writes it to
    /// the output target and reports timing. The clock covers cache lookup,
    /// network and the output write.
    pub fn run(&self, cfg: &MycurlConfig) -> Result<TransferReport> {
        let started = Instant::now();

        let cache = if self.request.use_cache {
            let c = ResponseCache::open_default(cfg)?;
            tracing::debug!("response cache at {}", c.dir().display());
            Some(c)
        } else {
            None
        };

        let cached = match &cache {
            Some(c) => c.get(&self.url)?,
            None => None,
        };

        let (body, final_url, redirects, from_cache) = match cached {
            Some(hit) => {
                tracing::info!("serving {} from cache", self.url);
                let final_url = hit.final_url().unwrap_or_else(|e| {
                    tracing::warn!(
                        "cached final URL {:?} does not parse ({}); reporting {}",
                        hit.meta.final_url,
                        e,
                        self.url
                    );
                    self.url.clone()
                });
                (hit.body, final_url, hit.meta.redirects, true)
            }
            None => {
                let opts = FetchOptions::from_config(cfg);
                let policy = cfg.retry_policy();
                let response = run_with_retry(&policy, || fetch::fetch(&self.url, &opts))
                    .with_context(|| format!("GET {}", self.url))?;
                if let Some(c) = &cache {
                    // Cache write failures are logged, not fatal.
                    if let Err(e) = c.put(&self.url, &response) {
                        tracing::warn!("could not cache {}: {:#}", self.url, e);
                    }
                }
                (response.body, response.url, response.redirects, false)
            }
        };

        self.request.output.write_body(&body)?;
        let elapsed = started.elapsed();

        let report = TransferReport {
            finished_at: chrono::Local::now().naive_local(),
            raw_url: self.request.raw_url.clone(),
            final_url,
            bytes: body.len() as u64,
            elapsed,
            redirects,
            from_cache,
        };
        tracing::info!(
            url = %self.url,
            final_url = %report.final_url,
            bytes = report.bytes,
            elapsed_ms = elapsed.as_millis() as u64,
            redirects,
            from_cache,
            "transfer finished"
        );
        Ok(report)
    }
}
