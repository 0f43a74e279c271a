//! Configuration management.
//!
//! Configuration is resolved once at startup into a [`TickerConfig`] value and
//! passed by parameter to the fetcher and the export dispatcher. Nothing in
//! `core` reads the process environment.
//!
//! # Sources
//!
//! - An optional TOML file with `${VAR_NAME}` substitution ([`load_config`])
//! - Environment variables, which override file values ([`load_from_env`])
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [polygon]
//! api_key = "${POLYGON_API_KEY}"
//! ticker_limit = 1000
//!
//! [export.csv]
//! enabled = true
//! name = "ticker_list"
//! dir = "csv"
//!
//! [export.postgres]
//! enabled = true
//! user = "etl"
//! password = "${POSTGRES_PASSWORD}"
//! host = "localhost"
//! port = 5432
//! database = "markets"
//! ```
//!
//! # Environment Variables
//!
//! ```bash
//! export POLYGON_API_KEY="..."
//! export TICKER_LIMIT=1000
//! export EXPORT_CSV=True
//! export CSV_NAME=ticker_list
//! export CSV_DIR=csv
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_from_env};
pub use schema::{
    ApplicationConfig, ExportConfig, FileSinkConfig, LoggingConfig, PolygonConfig,
    PostgresSinkConfig, TickerConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
