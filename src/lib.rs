//! Property listing extraction: fetch a listing page, then try JSON-LD,
//! the embedded Next.js state and finally plain HTML heuristics.

pub mod error;
pub mod models;
pub mod scrapers;
pub mod sink;

pub use error::{ScrapeError, TransportError};
pub use models::{ListingFields, ListingRecord, Outcome, SinkRow, GONE_MESSAGE};
pub use scrapers::{FetchConfig, ListingScraper, RightmoveScraper};
