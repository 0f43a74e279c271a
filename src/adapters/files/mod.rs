//! Filesystem sinks (CSV, JSON, Excel)
//!
//! All three share the collision-free naming in [`naming`]: an export lands in
//! `{dir}/{name}.{ext}`, or `{dir}/{name}{n}.{ext}` with the smallest `n` not
//! already taken. Existing files are never opened for writing.

pub mod csv;
pub mod excel;
pub mod json;
pub mod naming;

pub use self::csv::CsvSink;
pub use self::excel::ExcelSink;
pub use self::json::JsonSink;
pub use naming::{candidate_name, create_output_file, OutputLocation};
