//! Data transformation logic
//!
//! The only transform applied to fetched records is the timestamp rewrite of
//! `last_updated_utc`, run once after pagination completes.

pub mod timestamp;

pub use timestamp::{
    convert_timestamp, normalize_dataset, normalize_record, normalize_timestamp,
    NormalizationStats,
};
