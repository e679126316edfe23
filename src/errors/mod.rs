use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid source URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Status code of the failed response, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Network(e) => e.status(),
            FetchError::InvalidUrl(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum FeedError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // Network errors
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    // Output errors
    #[error("Feed rendering failed: {0}")]
    Render(String),

    #[error("Failed to write feed to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<rss::Error> for FeedError {
    fn from(err: rss::Error) -> Self {
        FeedError::Render(err.to_string())
    }
}

pub type FeedResult<T> = Result<T, FeedError>;

/// A single field of an entry that could not be read and fell back to a default
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} of \"{title}\" could not be parsed from {raw:?}, using fallback")]
pub struct ParseWarning {
    pub title: String,
    pub field: &'static str,
    pub raw: String,
}

/// Anomalies that degrade the feed without aborting the run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    #[error(transparent)]
    Parse(#[from] ParseWarning),

    #[error("No entries found. The page structure may have changed.")]
    EmptyResult,
}
