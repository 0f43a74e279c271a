//! Polygon reference API client
//!
//! Issues single GET requests against the ticker listing and builds the URLs
//! the fetcher walks through. There is no retry here: one attempt per page.

use super::models::TickerPage;
use crate::config::PolygonConfig;
use crate::domain::{PolygonError, Result, TickerError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// Path of the ticker listing endpoint, joined onto the configured base URL
pub const LISTING_PATH: &str = "/v3/reference/tickers";

/// Query parameter carrying the credential
pub const API_KEY_PARAM: &str = "apiKey";

/// Source of ticker pages
///
/// The fetcher only depends on this trait, so tests can drive pagination with
/// an in-memory source.
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// Base URL that relative continuation tokens are resolved against
    fn base_url(&self) -> &str;

    /// Fetches and decodes one page
    ///
    /// # Errors
    ///
    /// Returns `TickerError::Polygon` on transport failure, timeout,
    /// non-success status or an undecodable body.
    async fn get_page(&self, url: &Url) -> Result<TickerPage>;
}

/// HTTP implementation of [`TickerSource`]
pub struct PolygonClient {
    base_url: String,
    client: Client,
}

impl PolygonClient {
    /// Creates a client with the configured per-request timeout
    ///
    /// # Errors
    ///
    /// Returns `TickerError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: &PolygonConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)))
            .user_agent(concat!("ticker-export/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                TickerError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl TickerSource for PolygonClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_page(&self, url: &Url) -> Result<TickerPage> {
        tracing::debug!(url = %redact_api_key(url), "Requesting ticker page");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PolygonError::from_status(status.as_u16(), body).into());
        }

        let page = response.json::<TickerPage>().await.map_err(|e| {
            if e.is_timeout() {
                PolygonError::Timeout(e.without_url().to_string())
            } else {
                PolygonError::InvalidResponse(e.without_url().to_string())
            }
        })?;

        Ok(page)
    }
}

/// Maps a send failure, dropping the URL so the key never reaches a log line
fn request_error(e: reqwest::Error) -> TickerError {
    let timed_out = e.is_timeout();
    let message = e.without_url().to_string();
    if timed_out {
        PolygonError::Timeout(message).into()
    } else {
        PolygonError::ConnectionFailed(message).into()
    }
}

/// Builds the first page URL
///
/// `{base}/v3/reference/tickers?market=stocks&active=true&order=asc&limit={limit}&sort=ticker&apiKey={key}`
///
/// # Errors
///
/// Returns `PolygonError::InvalidUrl` if `base_url` is not an absolute URL.
pub fn listing_url(base_url: &str, limit: u32, api_key: &str) -> Result<Url> {
    let mut url = parse_base(base_url)?
        .join(LISTING_PATH)
        .map_err(|e| PolygonError::InvalidUrl(format!("{base_url}{LISTING_PATH}: {e}")))?;

    url.query_pairs_mut()
        .append_pair("market", "stocks")
        .append_pair("active", "true")
        .append_pair("order", "asc")
        .append_pair("limit", &limit.to_string())
        .append_pair("sort", "ticker")
        .append_pair(API_KEY_PARAM, api_key);

    Ok(url)
}

/// Resolves a `next_url` token and re-appends the credential
///
/// The API does not echo the key into `next_url`. Relative tokens are resolved
/// against `base_url`; any stale `apiKey` pair is replaced.
///
/// # Errors
///
/// Returns `PolygonError::InvalidUrl` if the token cannot be resolved.
pub fn continuation_url(base_url: &str, next_url: &str, api_key: &str) -> Result<Url> {
    let mut url = parse_base(base_url)?
        .join(next_url)
        .map_err(|e| PolygonError::InvalidUrl(format!("next_url '{next_url}': {e}")))?;

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != API_KEY_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(API_KEY_PARAM, api_key);

    Ok(url)
}

/// Renders a URL with the credential masked
pub fn redact_api_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == API_KEY_PARAM {
                (k.into_owned(), "***".to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();
    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}

fn parse_base(base_url: &str) -> Result<Url> {
    Url::parse(base_url)
        .map_err(|e| PolygonError::InvalidUrl(format!("base_url '{base_url}': {e}")).into())
}
