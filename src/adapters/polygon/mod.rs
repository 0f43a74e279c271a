//! Polygon.io reference API adapter
//!
//! HTTP client, URL construction and page models for the ticker listing.

pub mod client;
pub mod models;

pub use client::{continuation_url, listing_url, redact_api_key, PolygonClient, TickerSource};
pub use models::TickerPage;
