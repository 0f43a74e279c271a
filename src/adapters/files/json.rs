//! JSON file sink
//!
//! Output is an array of row objects. Every object carries every column of the
//! dataset in column order, with `null` where a record lacks the field, so the
//! file reads back as a rectangular table.

use super::naming::OutputLocation;
use crate::adapters::sink::{Sink, SinkKind, SinkReceipt};
use crate::domain::{Dataset, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::{BufWriter, Write};

pub struct JsonSink {
    location: OutputLocation,
}

impl JsonSink {
    pub fn new(location: OutputLocation) -> Self {
        Self { location }
    }
}

#[async_trait]
impl Sink for JsonSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Json
    }

    fn target(&self) -> String {
        self.location.dir.display().to_string()
    }

    async fn write(&self, dataset: &Dataset) -> Result<SinkReceipt> {
        let (path, rows) = self
            .location
            .write_new("json", |file| write_json(BufWriter::new(file), dataset))?;
        Ok(SinkReceipt {
            target: path.display().to_string(),
            rows,
        })
    }
}

/// Serializes the dataset as an array of row objects
///
/// # Errors
///
/// Returns `TickerError::Serialization` or `TickerError::Io` on failure.
pub fn write_json<W: Write>(mut writer: W, dataset: &Dataset) -> Result<usize> {
    let columns = dataset.columns();
    let rows: Vec<Map<String, Value>> = dataset
        .records()
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| (c.clone(), record.get(c).cloned().unwrap_or(Value::Null)))
                .collect()
        })
        .collect();

    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.flush()?;
    Ok(rows.len())
}
