// ticker-export - Polygon.io ticker list exporter
// Copyright (c) 2025 Ticker Export Contributors
// Licensed under the MIT License

//! # ticker-export
//!
//! Fetches the full Polygon.io stock ticker reference list by following the
//! API's cursor pagination, normalizes the `last_updated_utc` timestamps, and
//! writes the result to any combination of CSV, JSON, Excel and PostgreSQL.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Pagination, timestamp normalization, export dispatch
//! - [`adapters`] - Polygon HTTP client and the export sinks
//! - [`domain`] - Records, datasets and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ticker_export::config::load_from_env;
//! use ticker_export::core::export::ExportDispatcher;
//! use ticker_export::core::fetch::TickerFetcher;
//! use secrecy::ExposeSecret;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_from_env()?;
//!
//!     let fetcher = TickerFetcher::from_config(&config.polygon)?;
//!     let key = config.polygon.api_key.as_ref().map(|k| AsRef::<str>::as_ref(k.expose_secret()));
//!     let outcome = fetcher
//!         .fetch(key, config.polygon.ticker_limit.as_deref())
//!         .await?;
//!
//!     let summary = ExportDispatcher::from_config(&config.export)
//!         .export(&outcome.dataset)
//!         .await;
//!
//!     println!("Exported {} tickers to {} sinks", outcome.dataset.len(), summary.outcomes.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Policy
//!
//! - Missing or invalid API key or limit: rejected before any request
//! - A failed page: pagination stops, the records fetched so far are exported
//! - A failed sink: recorded in the [`core::export::ExportSummary`], the other
//!   sinks still run

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
