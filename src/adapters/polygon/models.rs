//! Polygon API models
//!
//! Response structures for the `v3/reference/tickers` listing endpoint. Only
//! the pagination contract is typed; each result stays an open [`Record`].

use crate::domain::Record;
use serde::{Deserialize, Serialize};

/// One decoded page of the ticker listing
///
/// Example body:
///
/// ```json
/// {
///   "results": [{"ticker": "A", "name": "Agilent Technologies Inc.", "active": true}],
///   "status": "OK",
///   "request_id": "e70a7a9c...",
///   "count": 1,
///   "next_url": "https://api.polygon.io/v3/reference/tickers?cursor=YWN0aXZl..."
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickerPage {
    /// Records on this page; an absent key means an empty page
    #[serde(default)]
    pub results: Vec<Record>,

    /// Continuation URL without the `apiKey` parameter
    #[serde(default)]
    pub next_url: Option<String>,

    /// Status string reported by the API ("OK", "DELAYED", ...)
    #[serde(default)]
    pub status: Option<String>,

    /// Request identifier, useful when reporting issues upstream
    #[serde(default)]
    pub request_id: Option<String>,

    /// Number of results on this page as reported by the API
    #[serde(default)]
    pub count: Option<u64>,
}

impl TickerPage {
    /// Continuation token, ignoring empty strings
    pub fn next_token(&self) -> Option<&str> {
        self.next_url.as_deref().filter(|s| !s.trim().is_empty())
    }
}
