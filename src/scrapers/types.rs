use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Fetch policy for listing pages
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-attempt request timeout
    pub timeout: Duration,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Total attempts, including the first request
    pub max_attempts: u32,
    /// Base of the exponential backoff between attempts
    pub backoff_base: Duration,
    /// Upper bound for any single wait between attempts
    pub max_backoff: Duration,
    /// Status codes that trigger another attempt
    pub retry_statuses: Vec<u16>,
    /// Honour a numeric `Retry-After` header on retryable responses
    pub respect_retry_after: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
            max_backoff: Duration::from_secs(120),
            retry_statuses: vec![429, 500, 502, 503, 504],
            respect_retry_after: true,
        }
    }
}

impl FetchConfig {
    pub fn is_retryable(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Wait before retry number `retry` (1-based): 0, base, 2*base, 4*base, ...
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry <= 1 {
            return Duration::ZERO;
        }
        let factor = 2u32.saturating_pow(retry - 2);
        self.backoff_base
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}
