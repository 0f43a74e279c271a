//! External system integrations.
//!
//! - [`polygon`] - Polygon.io reference API client
//! - [`sink`] - Export sink abstraction (trait-based)
//! - [`files`] - CSV, JSON and Excel file sinks
//! - [`postgresql`] - PostgreSQL table sink
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits ([`polygon::TickerSource`],
//! [`sink::Sink`]) so the core can be tested with in-memory implementations.
//!
//! ```rust,no_run
//! use ticker_export::adapters::polygon::{listing_url, PolygonClient, TickerSource};
//! use ticker_export::config::PolygonConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PolygonClient::new(&PolygonConfig::default())?;
//! let url = listing_url(client.base_url(), 1000, "api-key")?;
//! let page = client.get_page(&url).await?;
//! println!("{} tickers, more: {}", page.results.len(), page.next_token().is_some());
//! # Ok(())
//! # }
//! ```

pub mod files;
pub mod polygon;
pub mod postgresql;
pub mod sink;
