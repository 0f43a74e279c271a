//! Excel workbook sink
//!
//! One worksheet, bold header row, typed cells: booleans and numbers keep
//! their type, strings are written as text and nested values as JSON text.

use super::naming::OutputLocation;
use crate::adapters::sink::{Sink, SinkKind, SinkReceipt};
use crate::domain::{render_cell, Dataset, Result, TickerError};
use async_trait::async_trait;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde_json::Value;
use std::io::{Seek, Write};

/// Rows a worksheet can hold, header included
const MAX_ROWS: usize = 1_048_576;

/// Columns a worksheet can hold
const MAX_COLUMNS: usize = 16_384;

pub struct ExcelSink {
    location: OutputLocation,
}

impl ExcelSink {
    pub fn new(location: OutputLocation) -> Self {
        Self { location }
    }
}

#[async_trait]
impl Sink for ExcelSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Excel
    }

    fn target(&self) -> String {
        self.location.dir.display().to_string()
    }

    async fn write(&self, dataset: &Dataset) -> Result<SinkReceipt> {
        check_dimensions(dataset.len(), dataset.columns().len())?;
        let (path, rows) = self
            .location
            .write_new("xlsx", |file| write_workbook(file, dataset))?;
        Ok(SinkReceipt {
            target: path.display().to_string(),
            rows,
        })
    }
}

/// Builds the workbook and saves it to `writer`
///
/// # Errors
///
/// Returns `TickerError::Spreadsheet` if the dataset doesn't fit a worksheet
/// or the workbook cannot be written.
pub fn write_workbook<W: Write + Seek + Send>(writer: W, dataset: &Dataset) -> Result<usize> {
    let columns = dataset.columns();
    check_dimensions(dataset.len(), columns.len())?;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let header = Format::new().set_bold();

    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, column_index(col)?, name.as_str(), &header)?;
    }

    for (i, record) in dataset.records().iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, name) in columns.iter().enumerate() {
            write_cell(sheet, row, column_index(col)?, record.get(name))?;
        }
    }

    workbook.save_to_writer(writer)?;
    Ok(dataset.len())
}

/// Rejects datasets that cannot fit one worksheet
///
/// # Errors
///
/// Returns `TickerError::Spreadsheet` naming the exceeded limit.
pub fn check_dimensions(rows: usize, columns: usize) -> Result<()> {
    if rows >= MAX_ROWS {
        return Err(TickerError::Spreadsheet(format!(
            "{rows} rows exceed the worksheet limit of {}",
            MAX_ROWS - 1
        )));
    }
    if columns > MAX_COLUMNS {
        return Err(TickerError::Spreadsheet(format!(
            "{columns} columns exceed the worksheet limit of {MAX_COLUMNS}"
        )));
    }
    Ok(())
}

fn column_index(col: usize) -> Result<u16> {
    u16::try_from(col)
        .ok()
        .filter(|c| usize::from(*c) < MAX_COLUMNS)
        .ok_or_else(|| TickerError::Spreadsheet(format!("Column {col} exceeds the worksheet limit")))
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: Option<&Value>) -> Result<()> {
    match value {
        None | Some(Value::Null) => {}
        Some(Value::Bool(b)) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => {
                sheet.write_number(row, col, f)?;
            }
            None => {
                sheet.write_string(row, col, n.to_string())?;
            }
        },
        Some(other) => {
            sheet.write_string(row, col, render_cell(Some(other)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn test_writes_xlsx_archive() {
        let dataset = Dataset::from_records(vec![
            Record::try_from(json!({"ticker": "A", "active": true, "share_class_shares_outstanding": 284_000_000})).unwrap(),
            Record::try_from(json!({"ticker": "AA", "tags": ["x"]})).unwrap(),
        ]);

        let mut buf = Cursor::new(Vec::new());
        assert_eq!(write_workbook(&mut buf, &dataset).unwrap(), 2);

        // xlsx files are zip archives
        assert!(buf.get_ref().starts_with(b"PK"));
    }

    #[test]
    fn test_column_index_bounds() {
        assert_eq!(column_index(0).unwrap(), 0);
        assert_eq!(column_index(16_383).unwrap(), 16_383);
        assert!(column_index(16_384).is_err());
    }

    #[test]
    fn test_dimension_limits() {
        assert!(check_dimensions(MAX_ROWS - 1, MAX_COLUMNS).is_ok());
        assert!(check_dimensions(MAX_ROWS, 1).is_err());
        let err = check_dimensions(1, MAX_COLUMNS + 1).unwrap_err();
        assert!(err.to_string().contains("16385 columns"));
    }

    #[tokio::test]
    async fn test_oversized_dataset_leaves_no_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let wide: serde_json::Map<String, Value> = (0..=MAX_COLUMNS)
            .map(|i| (format!("c{i}"), json!(i)))
            .collect();
        let dataset = Dataset::from_records(vec![Record::try_from(Value::Object(wide)).unwrap()]);
        let sink = ExcelSink::new(OutputLocation {
            dir: temp.path().to_path_buf(),
            name: "ticker_list".to_string(),
        });

        let err = sink.write(&dataset).await.unwrap_err();

        assert!(matches!(err, TickerError::Spreadsheet(_)));
        assert!(!temp.path().join("ticker_list.xlsx").exists());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}
