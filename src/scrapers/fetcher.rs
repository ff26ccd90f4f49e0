use crate::error::{ScrapeError, TransportError};
use crate::scrapers::traits::{RawResponse, Transport};
use crate::scrapers::types::FetchConfig;
use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Remove any `#fragment` suffix from a URL
pub fn strip_fragment(url: &str) -> &str {
    url.split('#').next().unwrap_or(url)
}

/// A successfully fetched (2xx) listing page
#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug, Clone)]
pub enum FetchResult {
    Page(RawPage),
    /// The site answered 410 Gone
    Gone,
}

/// reqwest-backed transport. The client is the shared connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &FetchConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            body,
            retry_after,
        })
    }
}

/// GET with a bounded retry policy and status classification
pub struct Fetcher<T> {
    transport: T,
    config: FetchConfig,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, config: FetchConfig) -> Self {
        Self { transport, config }
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch `url` (fragment stripped), retrying transient statuses.
    /// 410 becomes `FetchResult::Gone`; other non-2xx statuses surface once
    /// retries are exhausted. Transport failures are not retried.
    pub async fn fetch_raw(&self, url: &str) -> Result<FetchResult, ScrapeError> {
        let clean_url = strip_fragment(url);
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            debug!("Fetching URL: {} (attempt {}/{})", clean_url, attempt, max_attempts);

            let response = self.transport.get(clean_url).await.map_err(|source| {
                error!("Request to {} failed: {}", clean_url, source);
                ScrapeError::Transport {
                    url: clean_url.to_string(),
                    source,
                }
            })?;
            let status = response.status;

            if self.config.is_retryable(status.as_u16()) && attempt < max_attempts {
                let wait = self.retry_wait(attempt, &response);
                warn!(
                    "{} returned status {}, retrying in {:?}",
                    clean_url, status, wait
                );
                if !wait.is_zero() {
                    tokio::time::sleep(wait).await;
                }
                attempt += 1;
                continue;
            }

            if status == StatusCode::GONE {
                error!("Listing gone (410): {}", clean_url);
                return Ok(FetchResult::Gone);
            }

            if !status.is_success() {
                error!("HTTP error fetching {}: {}", clean_url, status);
                return Err(ScrapeError::Http {
                    url: clean_url.to_string(),
                    status,
                });
            }

            debug!("HTTP {} received, body length={}", status.as_u16(), response.body.len());
            return Ok(FetchResult::Page(RawPage {
                url: clean_url.to_string(),
                status,
                body: response.body,
            }));
        }
    }

    fn retry_wait(&self, attempt: u32, response: &RawResponse) -> Duration {
        let backoff = self.config.backoff(attempt);
        let honours_header = matches!(
            response.status,
            StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
        );
        match response.retry_after {
            Some(retry_after) if self.config.respect_retry_after && honours_header => {
                backoff.max(retry_after).min(self.config.max_backoff)
            }
            _ => backoff,
        }
    }
}
