//! Export sink abstraction
//!
//! A trait-based seam over the export destinations, so the dispatcher works
//! the same way with files and database tables.

pub mod factory;
pub mod traits;

pub use factory::create_sinks;
pub use traits::{Sink, SinkKind, SinkReceipt};
