//! Paginated retrieval of the ticker listing

pub mod fetcher;
pub mod outcome;

pub use fetcher::{parse_limit, validate_api_key, TickerFetcher};
pub use outcome::{FetchOutcome, Termination};
