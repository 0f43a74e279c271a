//! Export command implementation
//!
//! Fetches the full ticker listing, prints a preview and writes the dataset
//! to every enabled sink.

use super::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::config::TickerConfig;
use crate::core::export::{ExportDispatcher, ExportSummary};
use crate::core::fetch::{FetchOutcome, TickerFetcher};
use crate::domain::Result;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Override the page size (TICKER_LIMIT)
    #[arg(long)]
    pub limit: Option<String>,

    /// Number of rows shown in the preview
    #[arg(long)]
    pub preview_rows: Option<usize>,

    /// Fetch and preview only; write nothing
    #[arg(long)]
    pub no_export: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config: Result<TickerConfig>) -> anyhow::Result<i32> {
        let mut config = match config {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Configuration could not be loaded");
                eprintln!("{e}");
                return Ok(EXIT_FAILURE);
            }
        };
        self.apply_overrides(&mut config);

        let fetcher = TickerFetcher::from_config(&config.polygon)?;
        let api_key = config
            .polygon
            .api_key
            .as_ref()
            .map(|k| AsRef::<str>::as_ref(k.expose_secret()));

        let outcome = match fetcher
            .fetch(api_key, config.polygon.ticker_limit.as_deref())
            .await
        {
            Ok(outcome) => outcome,
            Err(e) if e.is_configuration() => {
                tracing::error!(error = %e, "Fetch rejected before any request");
                eprintln!("{e}");
                return Ok(EXIT_FAILURE);
            }
            Err(e) => return Err(e.into()),
        };

        report_fetch(&outcome, config.application.preview_rows);

        if self.no_export {
            tracing::info!("Export skipped (--no-export)");
            return Ok(exit_code(&outcome, None));
        }

        let dispatcher = ExportDispatcher::from_config(&config.export);
        let summary = dispatcher.export(&outcome.dataset).await;
        report_export(&summary);

        Ok(exit_code(&outcome, Some(&summary)))
    }

    fn apply_overrides(&self, config: &mut TickerConfig) {
        if let Some(limit) = &self.limit {
            tracing::info!(limit = %limit, "Overriding ticker limit from CLI");
            config.polygon.ticker_limit = Some(limit.clone());
        }

        if let Some(rows) = self.preview_rows {
            config.application.preview_rows = rows;
        }
    }
}

fn report_fetch(outcome: &FetchOutcome, preview_rows: usize) {
    println!(
        "Fetched {} tickers ({} pages)",
        outcome.dataset.len(),
        outcome.pages
    );
    if !outcome.is_complete() {
        println!("Warning: pagination stopped early: {}", outcome.termination);
    }
    println!();
    println!("{}", outcome.dataset.preview(preview_rows));
}

fn report_export(summary: &ExportSummary) {
    if summary.outcomes.is_empty() {
        println!("No export sinks enabled");
        return;
    }

    for outcome in &summary.outcomes {
        match &outcome.error {
            None => println!(
                "[ok]     {:<8} {} rows -> {}",
                outcome.kind.to_string(),
                outcome.rows,
                outcome.target
            ),
            Some(error) => println!(
                "[failed] {:<8} {}: {}",
                outcome.kind.to_string(),
                outcome.target,
                error
            ),
        }
    }
}

/// 0 only if every page was fetched without error and every sink succeeded
fn exit_code(outcome: &FetchOutcome, summary: Option<&ExportSummary>) -> i32 {
    let fetch_ok = outcome.error().is_none();
    let export_ok = summary.map_or(true, ExportSummary::is_successful);
    if fetch_ok && export_ok {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}
