//! Cursor-following ticker fetcher
//!
//! Walks the listing one page at a time: each request completes before the
//! next one is issued. A failed page ends the walk and the records gathered so
//! far are returned as a partial result.
//!
//! ```text
//! fetching ──ok──▶ page-success ──next_url──▶ fetching
//!    │                   └──no next_url──▶ done (exhausted)
//!    └──error──▶ page-failed ──▶ done (partial)
//! ```
//!
//! The walk is also bounded by `max_pages` and stops if the API hands back a
//! cursor it already returned.

use crate::adapters::polygon::{
    continuation_url, listing_url, redact_api_key, PolygonClient, TickerSource,
};
use crate::config::PolygonConfig;
use crate::core::fetch::outcome::{FetchOutcome, Termination};
use crate::core::transform::normalize_dataset;
use crate::domain::{Dataset, Result, TickerError};
use crate::log_fetch_page;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Paginated fetcher over a [`TickerSource`]
pub struct TickerFetcher {
    source: Arc<dyn TickerSource>,
    max_pages: usize,
}

impl TickerFetcher {
    /// Creates a fetcher over any page source
    pub fn new(source: Arc<dyn TickerSource>, max_pages: usize) -> Self {
        Self {
            source,
            max_pages: max_pages.max(1),
        }
    }

    /// Creates a fetcher backed by the HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &PolygonConfig) -> Result<Self> {
        let client = PolygonClient::new(config)?;
        Ok(Self::new(Arc::new(client), config.max_pages))
    }

    /// Fetches every page of the listing and normalizes the result
    ///
    /// `key` and `limit` are validated before any request is made.
    ///
    /// # Errors
    ///
    /// Returns `TickerError::Configuration` if the key is absent or empty, or
    /// the limit is absent, non-numeric or not positive. Request failures are
    /// not errors: they end pagination and are reported through
    /// [`FetchOutcome::termination`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ticker_export::config::PolygonConfig;
    /// use ticker_export::core::fetch::TickerFetcher;
    ///
    /// # async fn example() -> ticker_export::domain::Result<()> {
    /// let fetcher = TickerFetcher::from_config(&PolygonConfig::default())?;
    /// let outcome = fetcher.fetch(Some("my-key"), Some("1000")).await?;
    /// println!("Fetched {} tickers", outcome.dataset.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch(&self, key: Option<&str>, limit: Option<&str>) -> Result<FetchOutcome> {
        let key = validate_api_key(key)?;
        let limit = parse_limit(limit)?;
        let mut url = listing_url(self.source.base_url(), limit, key)?;

        tracing::info!(limit = limit, max_pages = self.max_pages, "Fetching tickers");

        let start = Instant::now();
        let mut dataset = Dataset::new();
        let mut pages = 0usize;
        let mut seen_cursors: HashSet<String> = HashSet::new();

        let termination = loop {
            if pages >= self.max_pages {
                tracing::warn!(max_pages = self.max_pages, "Page limit reached, stopping");
                break Termination::PageLimit {
                    max_pages: self.max_pages,
                };
            }

            let page = match self.source.get_page(&url).await {
                Ok(page) => page,
                Err(error) => {
                    tracing::error!(
                        page = pages + 1,
                        url = %redact_api_key(&url),
                        error = %error,
                        "Page request failed, keeping records fetched so far"
                    );
                    break Termination::Failed {
                        page: pages + 1,
                        error,
                    };
                }
            };

            pages += 1;
            let next = page.next_token().map(str::to_string);
            let count = page.results.len();
            dataset.extend_page(page.results);
            log_fetch_page!(pages, count, dataset.len());

            let Some(next) = next else {
                break Termination::Exhausted;
            };

            if !seen_cursors.insert(next.clone()) {
                tracing::warn!(page = pages, "API repeated a cursor, stopping");
                break Termination::CursorRepeated { page: pages };
            }

            url = match continuation_url(self.source.base_url(), &next, key) {
                Ok(url) => url,
                Err(error) => {
                    tracing::error!(page = pages + 1, error = %error, "Unusable next_url");
                    break Termination::Failed {
                        page: pages + 1,
                        error,
                    };
                }
            };
        };

        let stats = normalize_dataset(&mut dataset);

        tracing::info!(
            records = dataset.len(),
            pages = pages,
            termination = %termination,
            timestamps_rewritten = stats.rewritten,
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetch finished"
        );

        Ok(FetchOutcome {
            dataset,
            pages,
            termination,
            normalization: stats,
        })
    }
}

/// Checks that the API key is present and non-blank
///
/// # Errors
///
/// Returns `TickerError::Configuration` otherwise.
pub fn validate_api_key(key: Option<&str>) -> Result<&str> {
    match key {
        Some(k) if !k.trim().is_empty() => Ok(k),
        _ => Err(TickerError::Configuration(
            "API key not found. Set POLYGON_API_KEY (or polygon.api_key)".to_string(),
        )),
    }
}

/// Parses the page size
///
/// Only plain ASCII digits are accepted (no sign, no whitespace), and the
/// value must be positive.
///
/// # Errors
///
/// Returns `TickerError::Configuration` for anything else.
pub fn parse_limit(limit: Option<&str>) -> Result<u32> {
    let invalid = || {
        TickerError::Configuration(format!(
            "Invalid limit value {:?}. Set TICKER_LIMIT (or polygon.ticker_limit) to a positive integer",
            limit.unwrap_or("")
        ))
    };

    let raw = limit.ok_or_else(invalid)?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::polygon::TickerPage;
    use crate::domain::{PolygonError, Record};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use test_case::test_case;
    use url::Url;

    /// Replays scripted pages and records every requested URL
    struct ScriptedSource {
        pages: Mutex<VecDeque<Result<TickerPage>>>,
        requested: Mutex<Vec<Url>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<TickerPage>>) -> Arc<Self> {
            Arc::new(Self {
                pages: Mutex::new(pages.into()),
                requested: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TickerSource for ScriptedSource {
        fn base_url(&self) -> &str {
            "https://api.polygon.io"
        }

        async fn get_page(&self, url: &Url) -> Result<TickerPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested.lock().unwrap().push(url.clone());
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(PolygonError::ConnectionFailed("script exhausted".into()).into()))
        }
    }

    fn page(tickers: &[&str], next: Option<&str>) -> Result<TickerPage> {
        Ok(TickerPage {
            results: tickers
                .iter()
                .map(|t| Record::try_from(json!({"ticker": t, "last_updated_utc": "2025-09-18T06:05:34.656751435Z"})).unwrap())
                .collect(),
            next_url: next.map(str::to_string),
            ..Default::default()
        })
    }

    fn tickers(outcome: &FetchOutcome) -> Vec<String> {
        outcome
            .dataset
            .records()
            .iter()
            .map(|r| r.get("ticker").and_then(|v| v.as_str()).unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_follows_cursor_until_exhausted() {
        let source = ScriptedSource::new(vec![
            page(&["A", "AA"], Some("/v3/reference/tickers?cursor=p2")),
            page(&["AAA"], Some("/v3/reference/tickers?cursor=p3")),
            page(&["AAAU", "AACG"], None),
        ]);
        let fetcher = TickerFetcher::new(source.clone(), 100);

        let outcome = fetcher.fetch(Some("k"), Some("2")).await.unwrap();

        assert_eq!(tickers(&outcome), vec!["A", "AA", "AAA", "AAAU", "AACG"]);
        assert_eq!(outcome.pages, 3);
        assert!(matches!(outcome.termination, Termination::Exhausted));
        assert!(outcome.is_complete());
        assert_eq!(source.calls(), 3);

        let requested = source.requested.lock().unwrap();
        assert!(requested[1].as_str().contains("cursor=p2"));
        assert!(requested[1].as_str().contains("apiKey=k"));
        assert!(requested[2].as_str().contains("cursor=p3"));
    }

    #[tokio::test]
    async fn test_failure_keeps_partial_records() {
        let source = ScriptedSource::new(vec![
            page(&["A", "AA"], Some("/v3/reference/tickers?cursor=p2")),
            Err(PolygonError::from_status(500, "boom").into()),
            page(&["never"], None),
        ]);
        let fetcher = TickerFetcher::new(source.clone(), 100);

        let outcome = fetcher.fetch(Some("k"), Some("2")).await.unwrap();

        assert_eq!(tickers(&outcome), vec!["A", "AA"]);
        assert!(matches!(outcome.termination, Termination::Failed { page: 2, .. }));
        assert!(!outcome.is_complete());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_records_normalized_after_fetch() {
        let source = ScriptedSource::new(vec![page(&["A"], None)]);
        let fetcher = TickerFetcher::new(source, 100);

        let outcome = fetcher.fetch(Some("k"), Some("10")).await.unwrap();

        assert_eq!(
            outcome.dataset.records()[0].last_updated_utc(),
            Some("2025-09-18 06:05:34.656751435")
        );
        assert_eq!(outcome.normalization.rewritten, 1);
    }

    #[tokio::test]
    async fn test_page_limit_bounds_the_walk() {
        let source = ScriptedSource::new(vec![
            page(&["A"], Some("?cursor=1")),
            page(&["B"], Some("?cursor=2")),
            page(&["C"], Some("?cursor=3")),
        ]);
        let fetcher = TickerFetcher::new(source.clone(), 2);

        let outcome = fetcher.fetch(Some("k"), Some("1")).await.unwrap();

        assert_eq!(tickers(&outcome), vec!["A", "B"]);
        assert!(matches!(
            outcome.termination,
            Termination::PageLimit { max_pages: 2 }
        ));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_repeated_cursor_stops() {
        let source = ScriptedSource::new(vec![
            page(&["A"], Some("?cursor=loop")),
            page(&["B"], Some("?cursor=loop")),
            page(&["C"], None),
        ]);
        let fetcher = TickerFetcher::new(source.clone(), 100);

        let outcome = fetcher.fetch(Some("k"), Some("1")).await.unwrap();

        assert_eq!(tickers(&outcome), vec!["A", "B"]);
        assert!(matches!(
            outcome.termination,
            Termination::CursorRepeated { page: 2 }
        ));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_request() {
        let source = ScriptedSource::new(vec![page(&["A"], None)]);
        let fetcher = TickerFetcher::new(source.clone(), 100);

        for key in [None, Some(""), Some("   ")] {
            let err = fetcher.fetch(key, Some("10")).await.unwrap_err();
            assert!(err.is_configuration());
        }
        assert_eq!(source.calls(), 0);
    }

    #[test_case(None ; "missing")]
    #[test_case(Some("") ; "empty")]
    #[test_case(Some("abc") ; "non numeric")]
    #[test_case(Some("-5") ; "negative")]
    #[test_case(Some("0") ; "zero")]
    #[test_case(Some("+5") ; "explicit sign")]
    #[test_case(Some(" 5") ; "leading space")]
    #[test_case(Some("1.5") ; "fractional")]
    #[test_case(Some("99999999999") ; "overflow")]
    fn test_parse_limit_rejects(limit: Option<&str>) {
        assert!(parse_limit(limit).unwrap_err().is_configuration());
    }

    #[test]
    fn test_parse_limit_accepts_positive_integers() {
        assert_eq!(parse_limit(Some("1")).unwrap(), 1);
        assert_eq!(parse_limit(Some("1000")).unwrap(), 1000);
        assert_eq!(parse_limit(Some("007")).unwrap(), 7);
    }

    #[tokio::test]
    async fn test_invalid_limit_fails_before_any_request() {
        let source = ScriptedSource::new(vec![page(&["A"], None)]);
        let fetcher = TickerFetcher::new(source.clone(), 100);

        for limit in ["-5", "abc"] {
            let err = fetcher.fetch(Some("k"), Some(limit)).await.unwrap_err();
            assert!(err.is_configuration());
        }
        assert_eq!(source.calls(), 0);
    }
}
