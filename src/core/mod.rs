//! Core business logic.
//!
//! # Modules
//!
//! - [`fetch`] - Cursor-following retrieval of the ticker listing
//! - [`transform`] - `last_updated_utc` normalization
//! - [`export`] - Dispatch to the enabled sinks and the run summary
//!
//! # Export Workflow
//!
//! 1. **Validate**: API key and page limit are checked before any request
//! 2. **Fetch**: Pages are requested one at a time until `next_url` runs out,
//!    a page fails, or a bound is hit
//! 3. **Normalize**: Timestamps are rewritten in place
//! 4. **Export**: Each enabled sink is attempted in order (CSV, JSON, Excel,
//!    PostgreSQL); failures are recorded, not propagated
//! 5. **Report**: The summary drives the exit status
//!
//! # Example
//!
//! ```rust,no_run
//! use ticker_export::config::TickerConfig;
//! use ticker_export::core::export::ExportDispatcher;
//! use ticker_export::core::fetch::TickerFetcher;
//!
//! # async fn example(config: TickerConfig) -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = TickerFetcher::from_config(&config.polygon)?;
//! let outcome = fetcher.fetch(Some("key"), Some("1000")).await?;
//!
//! let summary = ExportDispatcher::from_config(&config.export)
//!     .export(&outcome.dataset)
//!     .await;
//!
//! for sink in summary.failed() {
//!     println!("{} failed: {:?}", sink.kind, sink.error);
//! }
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod fetch;
pub mod transform;
