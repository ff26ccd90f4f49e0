pub mod embedded_state;
pub mod fetcher;
pub mod heuristic;
pub mod page;
pub mod rightmove;
pub mod structured;
pub mod traits;
pub mod types;

pub use fetcher::{strip_fragment, FetchResult, Fetcher, HttpTransport, RawPage};
pub use page::Page;
pub use rightmove::{extract_listing, RightmoveScraper};
pub use traits::{ListingScraper, ListingSink, RawResponse, Transport};
pub use types::FetchConfig;
