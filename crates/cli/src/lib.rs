//! # `trialfeed-cli` Library Crate
//!
//! Composes the report pipeline: resolve the report date, read the daily feed,
//! fetch the listed studies, flatten them, and write the spreadsheet. The
//! binary in `main.rs` only parses arguments, installs logging, and reports the
//! outcome.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use clap::Parser;
use reqwest::Client;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;
use trialfeed::constants::DEFAULT_BASE_URL;
use trialfeed::{extract_rows, format_report_date, resolve_report_date, RunReport};
use trialfeed_rss::{FeedError, FeedFetcher};
use trialfeed_sheets::{write_report, SheetError};
use trialfeed_studies::StudiesClient;

// --- CLI Argument Structs ---

/// Builds a spreadsheet of clinical trials first posted yesterday.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the ClinicalTrials.gov host serving the feed and studies API.
    #[arg(long, env = "CLINICALTRIALS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    /// Directory the spreadsheet is written to.
    #[arg(long, env = "TRIALFEED_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,
    /// Report on this first-posted date (YYYY-MM-DD) instead of yesterday.
    #[arg(long, env = "TRIALFEED_DATE")]
    pub date: Option<NaiveDate>,
}

// --- Pipeline ---

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error(transparent)]
    Sheet(#[from] SheetError),
}

/// Settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    /// Overrides the date derived from the current time.
    pub date: Option<NaiveDate>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            date: None,
        }
    }
}

impl From<Cli> for PipelineConfig {
    fn from(cli: Cli) -> Self {
        Self {
            base_url: cli.base_url,
            output_dir: cli.output_dir,
            date: cli.date,
        }
    }
}

/// Runs every stage once, in order.
///
/// Only a failed feed request (or a failure to write the file) stops the run.
/// Failed study batches are logged by the studies client and simply
/// contribute no rows.
pub async fn run_pipeline<Tz: TimeZone>(
    config: &PipelineConfig,
    now: DateTime<Tz>,
) -> Result<RunReport, PipelineError> {
    let report_date = config.date.unwrap_or_else(|| resolve_report_date(now));
    info!(
        "Building report for studies first posted on {}.",
        format_report_date(report_date)
    );

    let client = Client::builder().build()?;

    // 1. Feed -> identifiers
    let ids = FeedFetcher::new(client.clone(), config.base_url.as_str())
        .fetch_trial_ids(report_date)
        .await?;
    println!("\nTotal count of study IDs: {}", ids.len());

    // 2. Identifiers -> study records
    let studies = StudiesClient::new(client, config.base_url.as_str())
        .fetch_studies(&ids)
        .await;

    // 3. Records -> rows
    let rows = extract_rows(&studies);
    info!("Extracted {} rows from {} studies.", rows.len(), studies.len());

    // 4. Rows -> spreadsheet
    let output_path = write_report(&rows, report_date, &config.output_dir)?;

    Ok(RunReport {
        report_date,
        identifiers: ids.len(),
        records: studies.len(),
        rows: rows.len(),
        output_path,
    })
}

/// The main entry point for the `trialfeed` binary.
pub async fn run(cli: Cli) -> Result<RunReport, PipelineError> {
    let config = PipelineConfig::from(cli);
    run_pipeline(&config, Local::now()).await
}
