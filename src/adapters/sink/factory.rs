//! Sink factory
//!
//! Turns the export configuration into the list of enabled sinks, in the
//! fixed order CSV, JSON, Excel, PostgreSQL.

use crate::adapters::files::{CsvSink, ExcelSink, JsonSink, OutputLocation};
use crate::adapters::postgresql::PostgresSink;
use crate::adapters::sink::traits::Sink;
use crate::config::ExportConfig;

/// Creates every enabled sink
///
/// Nothing is opened here. File names and directories of enabled file sinks
/// are already checked when the configuration is loaded. Database connection
/// parameters are checked by the PostgreSQL sink when it writes, so an
/// incomplete database setup fails only that sink.
pub fn create_sinks(config: &ExportConfig) -> Vec<Box<dyn Sink>> {
    let mut sinks: Vec<Box<dyn Sink>> = Vec::new();

    if config.csv.enabled {
        sinks.push(Box::new(CsvSink::new(OutputLocation::from_config(
            &config.csv,
            "csv",
        ))));
    }

    if config.json.enabled {
        sinks.push(Box::new(JsonSink::new(OutputLocation::from_config(
            &config.json,
            "json",
        ))));
    }

    if config.excel.enabled {
        sinks.push(Box::new(ExcelSink::new(OutputLocation::from_config(
            &config.excel,
            "excel",
        ))));
    }

    if config.postgres.enabled {
        sinks.push(Box::new(PostgresSink::new(config.postgres.clone())));
    }

    tracing::debug!(
        sinks = ?sinks.iter().map(|s| s.kind().to_string()).collect::<Vec<_>>(),
        "Enabled sinks"
    );

    sinks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sink::SinkKind;

    #[test]
    fn test_nothing_enabled() {
        assert!(create_sinks(&ExportConfig::default()).is_empty());
    }

    #[test]
    fn test_fixed_order() {
        let mut config = ExportConfig::default();
        config.postgres.enabled = true;
        config.excel.enabled = true;
        config.csv.enabled = true;
        config.json.enabled = true;

        let kinds: Vec<SinkKind> = create_sinks(&config).iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![SinkKind::Csv, SinkKind::Json, SinkKind::Excel, SinkKind::Postgres]
        );
    }

    #[test]
    fn test_only_enabled_sinks() {
        let mut config = ExportConfig::default();
        config.json.enabled = true;

        let sinks = create_sinks(&config);
        assert_eq!(sinks.len(), 1);
        assert_eq!(sinks[0].kind(), SinkKind::Json);
        assert_eq!(sinks[0].target(), "json");
    }
}
