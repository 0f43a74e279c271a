//! Domain error types
//!
//! This module defines the error hierarchy for the ticker exporter.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum TickerError {
    /// Configuration-related errors (missing API key, invalid limit, bad config file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Polygon API errors
    #[error("Polygon API error: {0}")]
    Polygon(#[from] PolygonError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Spreadsheet writer errors
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl TickerError {
    /// Returns true for errors raised before any network activity
    pub fn is_configuration(&self) -> bool {
        matches!(self, TickerError::Configuration(_))
    }
}

/// Polygon-specific errors
///
/// Errors that occur while paging through the reference API.
/// These errors don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum PolygonError {
    /// Failed to reach the API
    #[error("Failed to connect to Polygon API: {0}")]
    ConnectionFailed(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Body could not be decoded as a page
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Endpoint or continuation URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl PolygonError {
    /// Maps a non-success status code to the matching variant
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status >= 500 {
            PolygonError::ServerError { status, message }
        } else {
            PolygonError::ClientError { status, message }
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for TickerError {
    fn from(err: std::io::Error) -> Self {
        TickerError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TickerError {
    fn from(err: serde_json::Error) -> Self {
        TickerError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TickerError {
    fn from(err: toml::de::Error) -> Self {
        TickerError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for TickerError {
    fn from(err: csv::Error) -> Self {
        TickerError::Export(format!("CSV write failed: {err}"))
    }
}

impl From<rust_xlsxwriter::XlsxError> for TickerError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        TickerError::Spreadsheet(err.to_string())
    }
}

impl From<tokio_postgres::Error> for TickerError {
    fn from(err: tokio_postgres::Error) -> Self {
        TickerError::Database(err.to_string())
    }
}
