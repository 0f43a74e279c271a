//! Sink abstraction
//!
//! Every export destination (flat file or database table) implements [`Sink`],
//! so the dispatcher can attempt them uniformly and in a fixed order.

use crate::domain::{Dataset, Result};
use async_trait::async_trait;
use std::fmt;

/// Kind of export destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Csv,
    Json,
    Excel,
    Postgres,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SinkKind::Csv => "csv",
            SinkKind::Json => "json",
            SinkKind::Excel => "excel",
            SinkKind::Postgres => "postgres",
        };
        f.write_str(name)
    }
}

/// What a successful write produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkReceipt {
    /// Resolved file path, or the table name for database sinks
    pub target: String,

    /// Rows written
    pub rows: usize,
}

/// Export destination
///
/// Implementations write the whole dataset in one call. A failure must leave
/// previously exported data untouched: file sinks never overwrite an existing
/// file and database sinks only append.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Destination kind
    fn kind(&self) -> SinkKind;

    /// Human-readable destination before the write (directory or table)
    fn target(&self) -> String;

    /// Writes every record of `dataset`
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be prepared or written.
    async fn write(&self, dataset: &Dataset) -> Result<SinkReceipt>;
}
