//! Where the response body goes (`-o/--output`).

use anyhow::{Context, Result};
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

/// Body destination chosen on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// No `-o`: the body is read and counted but not kept.
    #[default]
    Discard,
    /// `-o -`
    Stdout,
    /// `-o <file>`: created or truncated.
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => OutputTarget::Discard,
            Some("-") => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(PathBuf::from(path)),
        }
    }

    /// Writes the whole body and flushes.
    pub fn write_body(&self, body: &[u8]) -> Result<()> {
        match self {
            OutputTarget::Discard => Ok(()),
            OutputTarget::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(body).context("write body to stdout")?;
                out.flush().context("flush stdout")?;
                Ok(())
            }
            OutputTarget::File(path) => {
                std::fs::write(path, body)
                    .with_context(|| format!("write output file: {}", path.display()))
            }
        }
    }
}

/// The `-o` argument as typed, empty when absent.
impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Discard => Ok(()),
            OutputTarget::Stdout => f.write_str("-"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}
