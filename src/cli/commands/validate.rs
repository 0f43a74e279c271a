//! Validate config command implementation
//!
//! Loads and checks the configuration the way `export` would, without making
//! any network request or touching the filesystem.

use super::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::adapters::files::OutputLocation;
use crate::adapters::postgresql::ConnectionParams;
use crate::config::{FileSinkConfig, TickerConfig};
use crate::core::fetch::{parse_limit, validate_api_key};
use crate::domain::Result;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config: Result<TickerConfig>) -> anyhow::Result<i32> {
        let config = match config {
            Ok(c) => {
                println!("Configuration loaded");
                c
            }
            Err(e) => {
                println!("Failed to load configuration");
                println!("   Error: {e}");
                return Ok(EXIT_FAILURE);
            }
        };

        let problems = check(&config);

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Polygon Base URL: {}", config.polygon.base_url);
        println!(
            "  API Key: {}",
            if config.polygon.api_key.is_some() { "set" } else { "not set" }
        );
        println!(
            "  Ticker Limit: {}",
            config.polygon.ticker_limit.as_deref().unwrap_or("not set")
        );
        println!("  Request Timeout: {}s", config.polygon.timeout_seconds);
        println!("  Max Pages: {}", config.polygon.max_pages);
        print_file_sink("CSV", &config.export.csv, "csv");
        print_file_sink("JSON", &config.export.json, "json");
        print_file_sink("Excel", &config.export.excel, "excel");
        if config.export.postgres.enabled {
            let connection = ConnectionParams::from_config(&config.export.postgres)
                .map(|p| p.redacted())
                .unwrap_or_else(|_| "incomplete parameters".to_string());
            println!(
                "  PostgreSQL: enabled, table {} on {connection}",
                config.export.postgres.table
            );
        } else {
            println!("  PostgreSQL: disabled");
        }
        println!();

        if problems.is_empty() {
            println!("Configuration is valid");
            Ok(EXIT_SUCCESS)
        } else {
            println!("Configuration has problems:");
            for problem in &problems {
                println!("   - {problem}");
            }
            Ok(EXIT_FAILURE)
        }
    }
}

/// Runs the checks the fetcher and sinks would run, collecting every problem
pub fn check(config: &TickerConfig) -> Vec<String> {
    let mut problems = Vec::new();

    let key = config
        .polygon
        .api_key
        .as_ref()
        .map(|k| AsRef::<str>::as_ref(k.expose_secret()));
    if let Err(e) = validate_api_key(key) {
        problems.push(e.to_string());
    }

    if let Err(e) = parse_limit(config.polygon.ticker_limit.as_deref()) {
        problems.push(e.to_string());
    }

    if config.export.postgres.enabled {
        if let Err(e) = ConnectionParams::from_config(&config.export.postgres) {
            problems.push(e.to_string());
        }
    }

    problems
}

fn print_file_sink(label: &str, sink: &FileSinkConfig, fallback_dir: &str) {
    if sink.enabled {
        let location = OutputLocation::from_config(sink, fallback_dir);
        println!(
            "  {label}: enabled, {}/{}*",
            location.dir.display(),
            location.name
        );
    } else {
        println!("  {label}: disabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_defaults_report_missing_key_and_limit() {
        let problems = check(&TickerConfig::default());
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("API key"));
        assert!(problems[1].contains("limit"));
    }

    #[test]
    fn test_complete_config_has_no_problems() {
        let mut config = TickerConfig::default();
        config.polygon.api_key = Some(secret_string("k".to_string()));
        config.polygon.ticker_limit = Some("1000".to_string());
        assert!(check(&config).is_empty());
    }

    #[test]
    fn test_enabled_postgres_without_parameters() {
        let mut config = TickerConfig::default();
        config.polygon.api_key = Some(secret_string("k".to_string()));
        config.polygon.ticker_limit = Some("1000".to_string());
        config.export.postgres.enabled = true;

        let problems = check(&config);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("POSTGRES_HOST"));
    }

    #[tokio::test]
    async fn test_load_failure_exit_code() {
        let code = ValidateArgs {}
            .execute(Err(crate::domain::TickerError::Configuration("x".into())))
            .await
            .unwrap();
        assert_eq!(code, EXIT_FAILURE);
    }
}
