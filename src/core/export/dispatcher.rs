//! Multi-sink export dispatcher
//!
//! Offers the dataset to each enabled sink in turn. Sinks are isolated: a
//! failure is recorded in the summary and the remaining sinks are still
//! attempted.

use crate::adapters::sink::{create_sinks, Sink};
use crate::config::ExportConfig;
use crate::core::export::summary::{ExportSummary, SinkOutcome};
use crate::domain::Dataset;
use crate::{log_error_with_context, log_sink_written};
use std::time::Instant;

pub struct ExportDispatcher {
    sinks: Vec<Box<dyn Sink>>,
}

impl ExportDispatcher {
    /// Dispatcher over an explicit list of sinks, attempted in order
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self { sinks }
    }

    /// Dispatcher over every sink enabled in `config`
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(create_sinks(config))
    }

    /// Number of sinks that will be attempted
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Writes `dataset` to every sink, one after another
    pub async fn export(&self, dataset: &Dataset) -> ExportSummary {
        let start = Instant::now();
        let mut summary = ExportSummary::new(dataset.len());

        if self.sinks.is_empty() {
            tracing::info!("No export sinks enabled");
        }

        for sink in &self.sinks {
            let kind = sink.kind();
            tracing::debug!(sink = %kind, output = %sink.target(), "Writing dataset");

            let outcome = match sink.write(dataset).await {
                Ok(receipt) => {
                    log_sink_written!(kind, receipt.target, receipt.rows);
                    SinkOutcome::written(kind, receipt)
                }
                Err(e) => {
                    log_error_with_context!(e, format!("{kind} export failed"));
                    SinkOutcome::failed(kind, sink.target(), e.to_string())
                }
            };
            summary.add_outcome(outcome);
        }

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();
        summary
    }
}
