//! Configuration schema types
//!
//! Every section carries serde defaults, so an empty TOML file (or no file at
//! all, see [`crate::config::load_from_env`]) yields a usable configuration in
//! which no sink is enabled.

use crate::config::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Reference API settings
    #[serde(default)]
    pub polygon: PolygonConfig,

    /// Export sinks
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TickerConfig {
    /// Validates the configuration
    ///
    /// The API key and page limit are not checked here; the fetcher validates
    /// them before its first request.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.polygon.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Number of rows printed in the post-fetch preview
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            preview_rows: default_preview_rows(),
        }
    }
}

/// Polygon reference API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonConfig {
    /// API key sent as the `apiKey` query parameter
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Page size as entered by the operator; validated by the fetcher
    #[serde(default, deserialize_with = "string_or_number")]
    pub ticker_limit: Option<String>,

    /// Scheme and host of the API; the listing path is appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Upper bound on the number of pages requested in one run
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

impl PolygonConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("polygon.base_url must start with http:// or https://".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("polygon.timeout_seconds must be > 0".to_string());
        }

        if self.max_pages == 0 {
            return Err("polygon.max_pages must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for PolygonConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            ticker_limit: None,
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            max_pages: default_max_pages(),
        }
    }
}

/// All export sinks, attempted in field order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// CSV file sink
    #[serde(default = "default_csv_sink")]
    pub csv: FileSinkConfig,

    /// JSON file sink
    #[serde(default = "default_json_sink")]
    pub json: FileSinkConfig,

    /// Excel workbook sink
    #[serde(default = "default_excel_sink")]
    pub excel: FileSinkConfig,

    /// PostgreSQL table sink
    #[serde(default)]
    pub postgres: PostgresSinkConfig,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        self.csv.validate("export.csv")?;
        self.json.validate("export.json")?;
        self.excel.validate("export.excel")?;
        self.postgres.validate()?;
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            csv: default_csv_sink(),
            json: default_json_sink(),
            excel: default_excel_sink(),
            postgres: PostgresSinkConfig::default(),
        }
    }
}

/// Flat file sink: base file name and target directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSinkConfig {
    /// Whether this sink runs
    #[serde(default)]
    pub enabled: bool,

    /// Base file name without extension or collision suffix
    #[serde(default = "default_file_name")]
    pub name: String,

    /// Directory the file is written into (created if missing); when unset
    /// the sink falls back to a directory named after its format
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl FileSinkConfig {
    /// Creates a disabled sink writing into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            enabled: false,
            name: default_file_name(),
            dir: Some(dir.into()),
        }
    }

    fn validate(&self, section: &str) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        if self.name.trim().is_empty() {
            return Err(format!("{section}.name cannot be empty"));
        }

        if self.name.contains(['/', '\\']) {
            return Err(format!(
                "{section}.name must be a plain file name, got '{}'",
                self.name
            ));
        }

        if self.dir.as_ref().is_some_and(|d| d.as_os_str().is_empty()) {
            return Err(format!("{section}.dir cannot be empty"));
        }

        Ok(())
    }
}

/// PostgreSQL sink configuration
///
/// Connection parameters are kept separately (not as one connection string)
/// so that each one can be checked for presence before connecting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresSinkConfig {
    /// Whether this sink runs
    #[serde(default)]
    pub enabled: bool,

    /// Database user
    #[serde(default)]
    pub user: Option<String>,

    /// Database password
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Server host name or address
    #[serde(default)]
    pub host: Option<String>,

    /// Server port, kept as text until validated
    #[serde(default, deserialize_with = "string_or_number")]
    pub port: Option<String>,

    /// Database name
    #[serde(default)]
    pub database: Option<String>,

    /// Target table
    #[serde(default = "default_table")]
    pub table: String,

    /// Connection timeout in seconds
    #[serde(default = "default_pg_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
}

impl PostgresSinkConfig {
    fn validate(&self) -> Result<(), String> {
        if self.table.is_empty()
            || !self
                .table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(format!(
                "export.postgres.table must contain only letters, digits and underscores, got '{}'",
                self.table
            ));
        }

        if self.connect_timeout_seconds == 0 {
            return Err("export.postgres.connect_timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for PostgresSinkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            user: None,
            password: None,
            host: None,
            port: None,
            database: None,
            table: default_table(),
            connect_timeout_seconds: default_pg_connect_timeout_seconds(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

/// Accepts `limit = 100` as well as `limit = "100"`
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_preview_rows() -> usize {
    5
}

fn default_base_url() -> String {
    "https://api.polygon.io".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_pages() -> usize {
    10_000
}

fn default_file_name() -> String {
    "ticker_list".to_string()
}

fn default_csv_sink() -> FileSinkConfig {
    FileSinkConfig::new("csv")
}

fn default_json_sink() -> FileSinkConfig {
    FileSinkConfig::new("json")
}

fn default_excel_sink() -> FileSinkConfig {
    FileSinkConfig::new("excel")
}

fn default_table() -> String {
    "tickers".to_string()
}

fn default_pg_connect_timeout_seconds() -> u64 {
    10
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
