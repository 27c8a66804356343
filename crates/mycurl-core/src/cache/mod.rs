//! On-disk response cache used with `--cache`.
//!
//! One entry per canonical URL: `<key>.body` holds the payload and
//! `<key>.json` the metadata. The metadata file is written last, so an entry
//! without it is treated as absent.

mod entry;

pub use entry::{CacheMeta, CachedResponse};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::MycurlConfig;
use crate::fetch::Response;
use crate::url_model::Url;

/// Directory-backed response cache.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// Cache directory from config, or `~/.cache/mycurl`.
    pub fn default_dir(cfg: &MycurlConfig) -> Result<PathBuf> {
        if let Some(dir) = &cfg.cache_dir {
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("mycurl")?;
        Ok(xdg_dirs.get_cache_home())
    }

    pub fn open_default(cfg: &MycurlConfig) -> Result<Self> {
        Self::open_at(&Self::default_dir(cfg)?)
    }

    /// Opens (creating if needed) a cache rooted at `dir`.
    pub fn open_at(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create cache dir: {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lowercase hex SHA-256 of the canonical URL rendering. Scheme case and
    /// an explicit default port therefore map to the same key.
    pub fn key(url: &Url) -> String {
        hex::encode(Sha256::digest(url.to_string().as_bytes()))
    }

    fn body_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.body"))
    }

    fn meta_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Looks up `url`. Missing, unreadable-as-JSON or truncated entries are misses.
    pub fn get(&self, url: &Url) -> Result<Option<CachedResponse>> {
        let key = Self::key(url);
        let meta_path = self.meta_path(&key);
        let Some(meta_bytes) = read_optional(&meta_path)? else {
            return Ok(None);
        };
        let meta: CacheMeta = match serde_json::from_slice(&meta_bytes) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("ignoring corrupt cache metadata {}: {}", meta_path.display(), e);
                return Ok(None);
            }
        };
        if meta.url != url.to_string() {
            tracing::warn!("cache key collision for {} (entry holds {})", url, meta.url);
            return Ok(None);
        }

        let body_path = self.body_path(&key);
        let Some(body) = read_optional(&body_path)? else {
            return Ok(None);
        };
        if body.len() as u64 != meta.body_len {
            tracing::warn!(
                "cache body {} has {} bytes, metadata says {}; ignoring",
                body_path.display(),
                body.len(),
                meta.body_len
            );
            return Ok(None);
        }

        tracing::debug!("cache hit for {} ({} bytes)", url, body.len());
        Ok(Some(CachedResponse { meta, body }))
    }

    /// Stores the final response for `url` (the URL as requested, before redirects).
    pub fn put(&self, url: &Url, response: &Response) -> Result<()> {
        let key = Self::key(url);
        let meta = CacheMeta::from_response(url, response);
        let json = serde_json::to_vec_pretty(&meta).context("serialize cache metadata")?;

        self.write_atomic(&self.body_path(&key), &response.body)?;
        self.write_atomic(&self.meta_path(&key), &json)?;
        tracing::debug!("cached {} as {}", url, key);
        Ok(())
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("create temp file in {}", self.dir.display()))?;
        tmp.write_all(data)
            .with_context(|| format!("write temp file for {}", path.display()))?;
        tmp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("persist {}", path.display()))?;
        Ok(())
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(b) => Ok(Some(b)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
    }
}
