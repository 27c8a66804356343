//! CLI for mycurl.

use anyhow::{Context, Result};
use clap::Parser;
use mycurl_core::config::{self, MycurlConfig};
use mycurl_core::output::OutputTarget;
use mycurl_core::transfer::{Transfer, TransferRequest};

/// Fetch a URL over HTTP or HTTPS and report size, time and throughput.
#[derive(Debug, Parser)]
#[command(name = "mycurl", version)]
#[command(about = "mycurl: minimal HTTP/HTTPS client", long_about = None)]
pub struct Cli {
    /// http:// or https:// URL to fetch.
    pub url: String,

    /// Write the body to FILE, or to stdout when FILE is "-". Without it the body is discarded.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Serve from and store into the on-disk response cache.
    #[arg(long)]
    pub cache: bool,
}

impl Cli {
    pub fn request(&self) -> TransferRequest {
        TransferRequest {
            raw_url: self.url.clone(),
            output: OutputTarget::from_arg(self.output.as_deref()),
            use_cache: self.cache,
        }
    }

    pub fn run_from_args() -> Result<()> {
        Cli::parse().run(config::load_or_init)
    }

    /// Decomposes the URL before anything touches the config file, so a bad
    /// URL is reported as such and leaves no side effects.
    pub fn run(&self, load_config: impl FnOnce() -> Result<MycurlConfig>) -> Result<()> {
        let transfer = Transfer::new(self.request()).context("URL parse error")?;
        tracing::debug!("decomposed {} as {:?}", self.url, transfer.url());

        let cfg = load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        println!("{}", transfer.banner());
        let report = transfer.run(&cfg)?;
        println!("{}", report);
        Ok(())
    }
}
