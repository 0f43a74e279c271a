//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use crate::config::{load_config, load_from_env, TickerConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// ticker-export - Polygon.io ticker list exporter
#[derive(Parser, Debug)]
#[command(name = "ticker-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file; without one, settings come from the
    /// environment (and `.env`) only
    #[arg(short, long, env = "TICKER_EXPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the ticker list and write it to every enabled sink
    Export(commands::export::ExportArgs),

    /// Check configuration without making any request
    ValidateConfig(commands::validate::ValidateArgs),
}

/// Resolves configuration from the file if one was given, else the environment
///
/// # Errors
///
/// Returns `TickerError::Configuration` if loading or validation fails.
pub fn resolve_config(path: Option<&Path>) -> Result<TickerConfig> {
    match path {
        Some(path) => load_config(path),
        None => load_from_env(),
    }
}
