use reqwest::StatusCode;
use thiserror::Error;

/// Network-level failure while talking to the listing site
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            TransportError::Timeout(message)
        } else if err.is_connect() {
            TransportError::Connect(message)
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(message)
        } else {
            TransportError::Other(message)
        }
    }
}

/// Failures surfaced by a scrape call
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP {status} fetching {url}")]
    Http { url: String, status: StatusCode },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("no listing data could be extracted from {url}")]
    ExtractionFailed { url: String },

    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ScrapeError {
    /// The page was fetched fine but no tier found usable data
    pub fn is_extraction_failure(&self) -> bool {
        matches!(self, ScrapeError::ExtractionFailed { .. })
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ScrapeError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
