//! # CBN Circulars
//!
//! Collects the circulars published on the Central Bank of Nigeria website
//! into a JSON file, optionally mirroring every linked PDF locally.
//!
//! ## Usage
//!
//! ```sh
//! # date, title and link of every circular
//! cbn_circulars list
//!
//! # download the PDFs into downloaded_pdfs/ and record their local paths
//! cbn_circulars download
//! ```
//!
//! Both commands write `cbn_circulars.json` by default, each with its own
//! record shape. The file is replaced on every run.
//!
//! ## Architecture
//!
//! 1. **Fetching**: GET the listing page with a browser `User-Agent`
//! 2. **Parsing**: read date, title and link from each row of the first table
//! 3. **Downloading** (`download` only): resolve PDF links and stream them to disk
//! 4. **Output**: write the collected records as one JSON array

use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod download;
mod error;
mod fetch;
mod links;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
#[cfg(test)]
mod test_support;

use cli::{Cli, Command};
use error::ScrapeError;
use fetch::build_client;
use pipeline::{RunSummary, run_download, run_listing};

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let result = run(&args).await;
    if report(&result, start_time.elapsed(), args.fail_on_error) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn run(args: &Cli) -> Result<RunSummary, ScrapeError> {
    let settings = args.settings()?;
    let client = build_client(&settings.user_agent)?;

    match args.command {
        Command::List { .. } => run_listing(&client, &settings).await,
        Command::Download { .. } => run_download(&client, &settings).await,
    }
}

/// Log how the run ended.
///
/// Returns `true` when the process should exit with a failure status, which
/// only happens for a failed run with `fail_on_error` set.
fn report(result: &Result<RunSummary, ScrapeError>, elapsed: Duration, fail_on_error: bool) -> bool {
    match result {
        Ok(summary) => {
            info!(
                ?elapsed,
                records = summary.records,
                path = %summary.output.display(),
                "Execution complete"
            );
            false
        }
        Err(e) => {
            error!(kind = ?e.kind(), error = %e, "Run failed");
            fail_on_error
        }
    }
}
