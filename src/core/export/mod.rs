//! Export dispatch and reporting
//!
//! This module provides the export side of a run:
//! - Dispatching the dataset to every enabled sink
//! - Per-sink outcomes and the run summary

pub mod dispatcher;
pub mod summary;

pub use dispatcher::ExportDispatcher;
pub use summary::{ExportSummary, SinkOutcome};
