//! # trialfeed: Daily Clinical Trials Report
//!
//! Thin entrypoint for the `trialfeed` binary. All logic lives in the
//! `trialfeed_cli` library crate.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use trialfeed_cli::{run, Cli};

// --- Main Application Entry ---

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Load `.env` overrides, if any
    dotenvy::dotenv().ok();

    // 2. Setup logging
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("trialfeed=info".parse()?))
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 3. Parse CLI arguments
    let cli = Cli::parse();

    // 4. Run the pipeline and report the outcome
    match run(cli).await {
        Ok(report) => {
            println!("Data saved to {}", report.output_path.display());
        }
        Err(e) => {
            // Status lines, failures included, go to stdout.
            println!("{e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
