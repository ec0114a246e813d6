// src/error.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Failure taxonomy for a scrape run.
///
/// Only run-aborting conditions live here. Structural extraction failures
/// (a missing fragment on one discipline) and requirement parse failures
/// are recovered locally and surface in the data instead: the discipline is
/// skipped, or its `reqs` field is `None`.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Network or HTTP failure while fetching a catalog page.
    #[error("retrieval failed for {url}: {reason}")]
    Retrieval { url: String, reason: String },

    /// A page-level structure the whole run depends on was missing.
    #[error("unexpected page structure: {0}")]
    Structure(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

impl ScrapeError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
