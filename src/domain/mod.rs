//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Dynamic records** ([`Record`]) and the ordered [`Dataset`] built from them
//! - **Error types** ([`TickerError`], [`PolygonError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, TickerError>`]:
//!
//! ```rust
//! use ticker_export::domain::{Result, TickerError};
//!
//! fn parse_limit(raw: &str) -> Result<u32> {
//!     raw.parse()
//!         .map_err(|_| TickerError::Configuration(format!("invalid limit: {raw}")))
//! }
//! ```

pub mod errors;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{PolygonError, TickerError};
pub use record::{render_cell, Dataset, Record, LAST_UPDATED_UTC};
pub use result::Result;
