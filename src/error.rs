//! Error types for the scraping pipelines.
//!
//! Every fallible step returns a [`ScrapeError`]. The pipelines look at
//! [`ScrapeError::kind`] to decide whether a failure ends the run or only
//! drops the current row.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`ScrapeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure or unexpected HTTP status.
    Network,
    /// The listing page or a link in it could not be interpreted.
    Parse,
    /// Writing files or the JSON output failed.
    Output,
    /// The configuration file could not be loaded.
    Config,
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid url {input:?}: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("could not find the data table on the page")]
    TableNotFound,

    #[error("row {row} ({title:?}) has no link in its title cell")]
    MissingAnchor { row: usize, title: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl ScrapeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScrapeError::Network { .. } | ScrapeError::Status { .. } => ErrorKind::Network,
            ScrapeError::InvalidUrl { .. }
            | ScrapeError::TableNotFound
            | ScrapeError::MissingAnchor { .. } => ErrorKind::Parse,
            ScrapeError::Io { .. } | ScrapeError::Json(_) => ErrorKind::Output,
            ScrapeError::Config { .. } => ErrorKind::Config,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScrapeError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        ScrapeError::Network {
            url: url.into(),
            source,
        }
    }
}
