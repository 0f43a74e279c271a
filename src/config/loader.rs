//! Configuration loader with TOML parsing and environment variable overrides
//!
//! Two entry points:
//! - [`load_config`] reads a TOML file, substitutes `${VAR}` placeholders and
//!   then applies environment overrides
//! - [`load_from_env`] starts from defaults and applies environment overrides
//!   only (the `.env`-driven setup)
//!
//! Overrides use the variable names operators already have in their `.env`
//! files (`POLYGON_API_KEY`, `EXPORT_CSV`, `POSTGRES_HOST`, ...). Sink toggles
//! are enabled only by the exact string `True`.

use super::schema::{FileSinkConfig, TickerConfig};
use super::secret::secret_string;
use crate::domain::errors::TickerError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Value that enables a sink toggle
pub const TRUTHY: &str = "True";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into `TickerConfig`
/// 4. Applies environment variable overrides
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `TickerError::Configuration` if the file cannot be read or parsed,
/// a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use ticker_export::config::load_config;
///
/// let config = load_config("ticker-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TickerConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TickerError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TickerError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: TickerConfig = toml::from_str(&contents)
        .map_err(|e| TickerError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    validate(&config)?;

    Ok(config)
}

/// Builds configuration from defaults plus environment variables
///
/// # Errors
///
/// Returns `TickerError::Configuration` if validation fails.
pub fn load_from_env() -> Result<TickerConfig> {
    let mut config = TickerConfig::default();
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    validate(&config)?;
    Ok(config)
}

fn validate(config: &TickerConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| TickerError::Configuration(format!("Configuration validation failed: {e}")))
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| TickerError::Other(format!("invalid placeholder pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(TickerError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment overrides through a lookup function
///
/// The lookup is injected so tests can supply variables without touching the
/// process environment.
pub fn apply_env_overrides<F>(config: &mut TickerConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("TICKER_EXPORT_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Reference API
    if let Some(val) = lookup("POLYGON_API_KEY") {
        config.polygon.api_key = Some(secret_string(val));
    }
    if let Some(val) = lookup("TICKER_LIMIT") {
        config.polygon.ticker_limit = Some(val);
    }
    if let Some(val) = lookup("POLYGON_BASE_URL") {
        config.polygon.base_url = val;
    }
    if let Some(Ok(secs)) = lookup("POLYGON_TIMEOUT_SECONDS").map(|v| v.parse()) {
        config.polygon.timeout_seconds = secs;
    }
    if let Some(Ok(pages)) = lookup("POLYGON_MAX_PAGES").map(|v| v.parse()) {
        config.polygon.max_pages = pages;
    }

    // File sinks
    apply_file_sink_overrides(&mut config.export.csv, "CSV", &lookup);
    apply_file_sink_overrides(&mut config.export.json, "JSON", &lookup);
    apply_file_sink_overrides(&mut config.export.excel, "EXCEL", &lookup);

    // PostgreSQL sink
    let postgres = &mut config.export.postgres;
    if let Some(val) = lookup("EXPORT_POSTGRES") {
        postgres.enabled = val == TRUTHY;
    }
    if let Some(val) = lookup("POSTGRES_USER") {
        postgres.user = Some(val);
    }
    if let Some(val) = lookup("POSTGRES_PASSWORD") {
        postgres.password = Some(secret_string(val));
    }
    if let Some(val) = lookup("POSTGRES_HOST") {
        postgres.host = Some(val);
    }
    if let Some(val) = lookup("POSTGRES_PORT") {
        postgres.port = Some(val);
    }
    if let Some(val) = lookup("POSTGRES_DB") {
        postgres.database = Some(val);
    }
    if let Some(val) = lookup("POSTGRES_TABLE") {
        postgres.table = val;
    }

    // Logging
    if let Some(val) = lookup("TICKER_EXPORT_LOG_DIR") {
        config.logging.local_enabled = true;
        config.logging.local_path = val;
    }
}

fn apply_file_sink_overrides<F>(sink: &mut FileSinkConfig, prefix: &str, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(&format!("EXPORT_{prefix}")) {
        sink.enabled = val == TRUTHY;
    }
    if let Some(val) = lookup(&format!("{prefix}_NAME")) {
        sink.name = val;
    }
    if let Some(val) = lookup(&format!("{prefix}_DIR")) {
        sink.dir = Some(PathBuf::from(val));
    }
}
