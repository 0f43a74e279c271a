// ticker-export - Polygon.io ticker list exporter
// Copyright (c) 2025 Ticker Export Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use ticker_export::cli::{resolve_config, Cli, Commands};
use ticker_export::config::LoggingConfig;
use ticker_export::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref());

    // Logging settings come from the config when it loaded; load errors are
    // reported by the command itself
    let (log_level, logging_config) = match &config {
        Ok(c) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| c.application.log_level.clone()),
            c.logging.clone(),
        ),
        Err(_) => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::default(),
        ),
    };

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "ticker-export starting");

    let exit_code = match execute_command(&cli, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            1
        }
    };

    // process::exit skips destructors
    drop(guard);
    process::exit(exit_code);
}

async fn execute_command(
    cli: &Cli,
    config: ticker_export::domain::Result<ticker_export::config::TickerConfig>,
) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(config).await,
    }
}
