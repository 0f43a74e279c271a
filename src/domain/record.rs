//! Ticker record and dataset model
//!
//! The reference API returns open-shaped objects, so a [`Record`] is a dynamic
//! field → value mapping rather than a fixed struct. Field order is the order
//! the API sent the fields in, which in turn drives the column order of every
//! export.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field rewritten by the normalization step
pub const LAST_UPDATED_UTC: &str = "last_updated_utc";

/// One ticker entity as returned by the listing endpoint
///
/// Well-known optional fields:
/// - `ticker`, `name`, `market`, `locale`, `primary_exchange`, `type`
/// - `active` (bool)
/// - [`LAST_UPDATED_UTC`] (timestamp string)
///
/// # Examples
///
/// ```
/// use ticker_export::domain::Record;
/// use serde_json::json;
///
/// let record = Record::try_from(json!({
///     "ticker": "AAPL",
///     "active": true,
///     "last_updated_utc": "2025-09-18T06:05:34.656751435Z"
/// }))
/// .unwrap();
///
/// assert_eq!(record.get("ticker").and_then(|v| v.as_str()), Some("AAPL"));
/// assert_eq!(record.last_updated_utc(), Some("2025-09-18T06:05:34.656751435Z"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a field, if present
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Sets a field, keeping its position if it already exists
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// Returns true if the field is present (even when null)
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Iterates over field names in arrival order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields carried by this record
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the record carries no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `last_updated_utc` field when it holds a string
    pub fn last_updated_utc(&self) -> Option<&str> {
        self.get(LAST_UPDATED_UTC).and_then(Value::as_str)
    }

    /// Mutable access to a field's value
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.0.get_mut(field)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Record {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(format!("expected a JSON object, got {other}")),
        }
    }
}

/// Ordered collection of records accumulated across all pages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Creates an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dataset from already-ordered records
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Appends one page of records, preserving their order
    pub fn extend_page(&mut self, page: impl IntoIterator<Item = Record>) {
        self.records.extend(page);
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were fetched
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in arrival order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Mutable iterator used by in-place transforms
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record> {
        self.records.iter_mut()
    }

    /// Union of all field names, ordered by first appearance
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for record in &self.records {
            for field in record.fields() {
                if !columns.iter().any(|c| c == field) {
                    columns.push(field.to_string());
                }
            }
        }
        columns
    }

    /// Renders the first `rows` records as an aligned text table
    pub fn preview(&self, rows: usize) -> String {
        const MAX_CELL_WIDTH: usize = 24;

        let columns = self.columns();
        if columns.is_empty() {
            return "(empty dataset)".to_string();
        }

        let shown = &self.records[..rows.min(self.records.len())];
        let mut grid: Vec<Vec<String>> = Vec::with_capacity(shown.len() + 1);
        grid.push(columns.clone());
        for record in shown {
            grid.push(
                columns
                    .iter()
                    .map(|c| truncate(&render_cell(record.get(c)), MAX_CELL_WIDTH))
                    .collect(),
            );
        }

        let widths: Vec<usize> = (0..columns.len())
            .map(|i| {
                grid.iter()
                    .map(|row| row[i].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for row in &grid {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        }
        if self.records.len() > shown.len() {
            out.push_str(&format!(
                "... {} more rows\n",
                self.records.len() - shown.len()
            ));
        }
        out
    }
}

impl IntoIterator for Dataset {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Renders a cell as text for tabular outputs
///
/// Missing and null cells are empty, strings are written verbatim, and nested
/// values fall back to their JSON text.
pub fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
