use crate::error::ScrapeError;
use crate::models::{ListingFields, ListingRecord, Outcome};
use crate::scrapers::embedded_state::try_embedded_state;
use crate::scrapers::fetcher::{FetchResult, Fetcher, HttpTransport, RawPage};
use crate::scrapers::heuristic::try_heuristic;
use crate::scrapers::page::Page;
use crate::scrapers::structured::try_structured;
use crate::scrapers::traits::{ListingScraper, Transport};
use crate::scrapers::types::FetchConfig;
use async_trait::async_trait;
use tracing::{debug, error, info};

/// One extraction strategy over a parsed page
pub type Tier = fn(&Page<'_>) -> Option<ListingFields>;

/// Extraction tiers in the order they are tried
pub const TIERS: [(&str, Tier); 3] = [
    ("json-ld", try_structured),
    ("next-data", try_embedded_state),
    ("html", try_heuristic),
];

/// Run the tiers in order and return the first that produces fields
pub fn extract_listing(body: &str) -> Option<(&'static str, ListingFields)> {
    let page = Page::parse(body);
    TIERS.iter().find_map(|(name, tier)| {
        debug!("Trying {} extraction", name);
        tier(&page).map(|fields| (*name, fields))
    })
}

/// Rightmove listing scraper: fetch then cascade through the tiers
pub struct RightmoveScraper<T = HttpTransport> {
    fetcher: Fetcher<T>,
}

impl RightmoveScraper<HttpTransport> {
    /// Create a scraper with the default fetch policy
    pub fn new() -> Result<Self, ScrapeError> {
        Self::with_config(FetchConfig::default())
    }

    /// Create a scraper with a custom fetch policy
    pub fn with_config(config: FetchConfig) -> Result<Self, ScrapeError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> RightmoveScraper<T> {
    pub fn with_transport(transport: T, config: FetchConfig) -> Self {
        Self {
            fetcher: Fetcher::new(transport, config),
        }
    }

    fn extract(page: RawPage) -> Result<Outcome, ScrapeError> {
        // Parsing is synchronous; the parsed DOM never lives across an await
        if let Some((tier, fields)) = extract_listing(&page.body) {
            info!("Extracted listing from {} via {}", page.url, tier);
            return Ok(Outcome::Listing(ListingRecord::new(page.url, fields)));
        }

        if !page.status.is_success() {
            return Err(ScrapeError::Http {
                url: page.url,
                status: page.status,
            });
        }

        error!("All parsing strategies failed for {}", page.url);
        Err(ScrapeError::ExtractionFailed { url: page.url })
    }
}

#[async_trait]
impl<T: Transport> ListingScraper for RightmoveScraper<T> {
    async fn scrape(&self, url: &str) -> Result<Outcome, ScrapeError> {
        match self.fetcher.fetch_raw(url).await? {
            FetchResult::Gone => Ok(Outcome::gone()),
            FetchResult::Page(page) => Self::extract(page),
        }
    }

    fn source_name(&self) -> &'static str {
        "Rightmove"
    }
}
