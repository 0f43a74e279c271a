//! Column typing for the tickers table
//!
//! A new table gets one column per dataset field, typed from the values seen:
//!
//! | values (nulls ignored)                         | column type        |
//! |------------------------------------------------|--------------------|
//! | all booleans                                   | `BOOLEAN`          |
//! | all integers fitting `i64`                     | `BIGINT`           |
//! | all numbers                                    | `DOUBLE PRECISION` |
//! | all strings of the form `YYYY-MM-DD HH:MM:SS.f` | `TIMESTAMP`        |
//! | anything else, or no values at all             | `TEXT`             |
//!
//! Appends to an existing table bind each value by that table's declared
//! column type, so a value that doesn't fit fails the insert.

use crate::domain::{render_cell, Dataset, Result, TickerError};
use chrono::NaiveDateTime;
use serde_json::Value;
use tokio_postgres::types::{ToSql, Type};

/// Format of normalized `last_updated_utc` values
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Inferred SQL type of a new column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Boolean,
    BigInt,
    Double,
    Timestamp,
    Text,
}

impl ColumnType {
    pub fn sql(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Double => "DOUBLE PRECISION",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Text => "TEXT",
        }
    }

    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(ColumnType::Boolean),
            Value::Number(n) if n.is_i64() => Some(ColumnType::BigInt),
            Value::Number(_) => Some(ColumnType::Double),
            Value::String(s) if parse_timestamp(s).is_some() => Some(ColumnType::Timestamp),
            _ => Some(ColumnType::Text),
        }
    }

    fn merge(self, other: Self) -> Self {
        use ColumnType::*;
        match (self, other) {
            (a, b) if a == b => a,
            (BigInt, Double) | (Double, BigInt) => Double,
            _ => Text,
        }
    }
}

/// Infers one type per column from every record's value
pub fn infer_column_types(dataset: &Dataset, columns: &[String]) -> Vec<ColumnType> {
    columns
        .iter()
        .map(|column| {
            dataset
                .records()
                .iter()
                .filter_map(|r| r.get(column).and_then(ColumnType::of))
                .reduce(ColumnType::merge)
                .unwrap_or(ColumnType::Text)
        })
        .collect()
}

/// Double-quotes an identifier
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `CREATE TABLE` statement for the dataset's columns
pub fn create_table_sql(table: &str, columns: &[String], types: &[ColumnType]) -> String {
    let defs: Vec<String> = columns
        .iter()
        .zip(types)
        .map(|(c, t)| format!("{} {}", quote_ident(c), t.sql()))
        .collect();
    format!("CREATE TABLE {} ({})", quote_ident(table), defs.join(", "))
}

/// Parameterized `INSERT` statement for the dataset's columns
pub fn insert_sql(table: &str, columns: &[String]) -> String {
    let names: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
    let params: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        names.join(", "),
        params.join(", ")
    )
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}

/// Converts one cell to a parameter of the given column type
///
/// Missing and null cells bind as SQL `NULL`.
///
/// # Errors
///
/// Returns `TickerError::Database` if the value can't be represented in the
/// column's type.
pub fn bind_value(column: &str, value: Option<&Value>, ty: &Type) -> Result<Box<dyn ToSql + Sync + Send>> {
    let value = match value {
        None | Some(Value::Null) => return Ok(null_of(ty)),
        Some(v) => v,
    };

    let mismatch = || {
        TickerError::Database(format!(
            "Column \"{column}\" of type {ty} cannot hold value {value}"
        ))
    };

    let bound: Box<dyn ToSql + Sync + Send> = match *ty {
        Type::BOOL => Box::new(value.as_bool().ok_or_else(mismatch)?),
        Type::INT8 => Box::new(value.as_i64().ok_or_else(mismatch)?),
        Type::INT4 => Box::new(
            value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(mismatch)?,
        ),
        Type::INT2 => Box::new(
            value
                .as_i64()
                .and_then(|n| i16::try_from(n).ok())
                .ok_or_else(mismatch)?,
        ),
        Type::FLOAT8 => Box::new(value.as_f64().ok_or_else(mismatch)?),
        Type::FLOAT4 => Box::new(value.as_f64().ok_or_else(mismatch)? as f32),
        Type::TIMESTAMP => Box::new(
            value
                .as_str()
                .and_then(parse_timestamp)
                .ok_or_else(mismatch)?,
        ),
        Type::TIMESTAMPTZ => Box::new(
            value
                .as_str()
                .and_then(parse_timestamp)
                .map(|t| t.and_utc())
                .ok_or_else(mismatch)?,
        ),
        Type::JSON | Type::JSONB => Box::new(value.clone()),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            Box::new(render_cell(Some(value)))
        }
        _ => {
            return Err(TickerError::Database(format!(
                "Column \"{column}\" has unsupported type {ty}"
            )))
        }
    };

    Ok(bound)
}

fn null_of(ty: &Type) -> Box<dyn ToSql + Sync + Send> {
    match *ty {
        Type::BOOL => Box::new(None::<bool>),
        Type::INT8 => Box::new(None::<i64>),
        Type::INT4 => Box::new(None::<i32>),
        Type::INT2 => Box::new(None::<i16>),
        Type::FLOAT8 => Box::new(None::<f64>),
        Type::FLOAT4 => Box::new(None::<f32>),
        Type::TIMESTAMP => Box::new(None::<NaiveDateTime>),
        Type::TIMESTAMPTZ => Box::new(None::<chrono::DateTime<chrono::Utc>>),
        Type::JSON | Type::JSONB => Box::new(None::<Value>),
        _ => Box::new(None::<String>),
    }
}
