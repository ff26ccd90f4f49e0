use crate::error::{ScrapeError, TransportError};
use crate::models::{Outcome, SinkRow};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// A single HTTP response as seen by the fetcher
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
    /// Parsed numeric `Retry-After` header, if any
    pub retry_after: Option<Duration>,
}

/// Performs one GET request. Implementations own the connection pool, the
/// timeout and the identity header; they never retry on their own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError>;
}

/// Common trait for all listing scrapers
/// New providers plug in next to Rightmove by implementing this
#[async_trait]
pub trait ListingScraper: Send + Sync {
    /// Fetch a listing page and extract a record from it
    async fn scrape(&self, url: &str) -> Result<Outcome, ScrapeError>;

    /// Get the name of the scraper source
    fn source_name(&self) -> &'static str;
}

/// Append-only destination for scraped rows
#[async_trait]
pub trait ListingSink: Send + Sync {
    async fn append(&self, row: &SinkRow) -> anyhow::Result<()>;
}
