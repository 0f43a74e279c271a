//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::adapters::sink::{SinkKind, SinkReceipt};
use std::time::Duration;

/// Result of one sink's write attempt
#[derive(Debug, Clone)]
pub struct SinkOutcome {
    /// Sink kind
    pub kind: SinkKind,

    /// Resolved path or table on success, configured target on failure
    pub target: String,

    /// Rows written (0 on failure)
    pub rows: usize,

    /// Error message if the sink failed
    pub error: Option<String>,
}

impl SinkOutcome {
    /// Outcome of a successful write
    pub fn written(kind: SinkKind, receipt: SinkReceipt) -> Self {
        Self {
            kind,
            target: receipt.target,
            rows: receipt.rows,
            error: None,
        }
    }

    /// Outcome of a failed write
    pub fn failed(kind: SinkKind, target: String, error: String) -> Self {
        Self {
            kind,
            target,
            rows: 0,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of an export run across all enabled sinks
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Records offered to each sink
    pub total_records: usize,

    /// One entry per attempted sink, in attempt order
    pub outcomes: Vec<SinkOutcome>,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(total_records: usize) -> Self {
        Self {
            total_records,
            ..Default::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a sink outcome
    pub fn add_outcome(&mut self, outcome: SinkOutcome) {
        self.outcomes.push(outcome);
    }

    /// Sinks that wrote successfully
    pub fn successful(&self) -> impl Iterator<Item = &SinkOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    /// Sinks that failed
    pub fn failed(&self) -> impl Iterator<Item = &SinkOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Check if every attempted sink succeeded
    pub fn is_successful(&self) -> bool {
        self.outcomes.iter().all(SinkOutcome::is_success)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            records = self.total_records,
            sinks = self.outcomes.len(),
            successful = self.successful().count(),
            failed = self.failed().count(),
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        for outcome in self.failed() {
            tracing::warn!(
                sink = %outcome.kind,
                output = %outcome.target,
                error = outcome.error.as_deref().unwrap_or_default(),
                "Sink failed"
            );
        }
    }
}
