//! `last_updated_utc` normalization
//!
//! Polygon reports timestamps as `2025-09-18T06:05:34.656751435Z`. PostgreSQL
//! (and spreadsheet users) expect `2025-09-18 06:05:34.656751435`. The rewrite
//! drops the `T` separator and the trailing `Z`, keeping the fractional seconds
//! verbatim whatever their precision.
//!
//! The transform is permissive: strings that don't start with the expected
//! shape are passed through unchanged, and so are non-string values.

use crate::domain::{Dataset, Record, LAST_UPDATED_UTC};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const POLYGON_TIMESTAMP: &str =
    r"^([0-9]{4}-[0-9]{2}-[0-9]{2})T([0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]+)(Z)?";

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(POLYGON_TIMESTAMP).expect("timestamp pattern compiles"))
}

/// Rewrites one timestamp string
///
/// Returns `None` when the string doesn't match, leaving the decision to keep
/// the original to the caller.
pub fn convert_timestamp(value: &str) -> Option<String> {
    pattern()
        .captures(value)
        .map(|caps| format!("{} {}", &caps[1], &caps[2]))
}

/// Normalizes an optional timestamp
///
/// # Examples
///
/// ```
/// use ticker_export::core::transform::normalize_timestamp;
///
/// assert_eq!(
///     normalize_timestamp(Some("2025-09-18T06:05:34.656751435Z")).as_deref(),
///     Some("2025-09-18 06:05:34.656751435")
/// );
/// assert_eq!(normalize_timestamp(Some("not-a-date")).as_deref(), Some("not-a-date"));
/// assert_eq!(normalize_timestamp(None), None);
/// ```
pub fn normalize_timestamp(value: Option<&str>) -> Option<String> {
    value.map(|v| convert_timestamp(v).unwrap_or_else(|| v.to_string()))
}

/// Counters reported after normalizing a dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationStats {
    /// Values rewritten to the normalized form
    pub rewritten: usize,

    /// Values present but left untouched (unmatched strings, non-strings)
    pub passed_through: usize,

    /// Records without the field, or with a null value
    pub absent: usize,
}

/// Normalizes `last_updated_utc` on one record in place
pub fn normalize_record(record: &mut Record, stats: &mut NormalizationStats) {
    match record.get_mut(LAST_UPDATED_UTC) {
        None | Some(Value::Null) => stats.absent += 1,
        Some(Value::String(raw)) => match convert_timestamp(raw) {
            Some(converted) => {
                *raw = converted;
                stats.rewritten += 1;
            }
            None => stats.passed_through += 1,
        },
        Some(_) => stats.passed_through += 1,
    }
}

/// Normalizes `last_updated_utc` on every record of a dataset
///
/// Records are rewritten in place; none are added or removed.
pub fn normalize_dataset(dataset: &mut Dataset) -> NormalizationStats {
    let mut stats = NormalizationStats::default();
    for record in dataset.iter_mut() {
        normalize_record(record, &mut stats);
    }

    if stats.passed_through > 0 {
        tracing::debug!(
            count = stats.passed_through,
            field = LAST_UPDATED_UTC,
            "Timestamps left unchanged (unrecognized format)"
        );
    }

    stats
}
