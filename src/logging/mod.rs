//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output
//! - Configurable log levels
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use ticker_export::logging::init_logging;
//! use ticker_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log one fetched page
///
/// # Example
///
/// ```no_run
/// use ticker_export::log_fetch_page;
///
/// log_fetch_page!(3, 1000, 3000);
/// ```
#[macro_export]
macro_rules! log_fetch_page {
    ($page:expr, $count:expr, $total:expr) => {
        tracing::info!(
            page = $page,
            count = $count,
            total = $total,
            "Fetched page"
        );
    };
}

/// Log a completed sink write
///
/// # Example
///
/// ```no_run
/// use ticker_export::log_sink_written;
///
/// log_sink_written!("csv", "csv/ticker_list.csv", 12_000);
/// ```
#[macro_export]
macro_rules! log_sink_written {
    ($sink:expr, $target:expr, $rows:expr) => {
        tracing::info!(
            sink = %$sink,
            output = %$target,
            rows = $rows,
            "Export written"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use ticker_export::log_error_with_context;
/// use ticker_export::domain::TickerError;
///
/// let error = TickerError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}
