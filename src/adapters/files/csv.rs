//! CSV file sink

use super::naming::OutputLocation;
use crate::adapters::sink::{Sink, SinkKind, SinkReceipt};
use crate::domain::{render_cell, Dataset, Result};
use async_trait::async_trait;
use std::io::Write;

/// Writes the dataset as one CSV file with a header row
pub struct CsvSink {
    location: OutputLocation,
}

impl CsvSink {
    pub fn new(location: OutputLocation) -> Self {
        Self { location }
    }
}

#[async_trait]
impl Sink for CsvSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Csv
    }

    fn target(&self) -> String {
        self.location.dir.display().to_string()
    }

    async fn write(&self, dataset: &Dataset) -> Result<SinkReceipt> {
        let (path, rows) = self
            .location
            .write_new("csv", |file| write_csv(file, dataset))?;
        Ok(SinkReceipt {
            target: path.display().to_string(),
            rows,
        })
    }
}

/// Writes header and rows to any writer, returning the row count
///
/// # Errors
///
/// Returns `TickerError::Export` on write failures.
pub fn write_csv<W: Write>(writer: W, dataset: &Dataset) -> Result<usize> {
    let columns = dataset.columns();
    let mut wtr = ::csv::Writer::from_writer(writer);

    if !columns.is_empty() {
        wtr.write_record(&columns)?;
    }

    for record in dataset {
        wtr.write_record(columns.iter().map(|c| render_cell(record.get(c))))?;
    }

    wtr.flush()?;
    Ok(dataset.len())
}
