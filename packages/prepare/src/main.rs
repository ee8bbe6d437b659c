#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the energy data preparation tool.

use std::path::PathBuf;

use clap::Parser;
use energy_risk_prepare::{PrepareConfig, PrepareOutcome, prepare};

#[derive(Parser)]
#[command(
    name = "energy_risk_prepare",
    about = "Derive the 2022 per-country energy risk table"
)]
struct Cli {
    /// Raw OWID energy CSV (defaults to `ENERGY_RISK_RAW_CSV` or
    /// `data/raw/owid-energy-data.csv`)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Processed CSV to write (defaults to `ENERGY_RISK_PROCESSED_CSV` or
    /// `data/processed/data_preparation.csv`)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let defaults = PrepareConfig::from_env();
    let config = PrepareConfig {
        input: cli.input.unwrap_or(defaults.input),
        output: cli.output.unwrap_or(defaults.output),
    };

    match prepare(&config)? {
        PrepareOutcome::Written { path, summary } => {
            println!(
                "File successfully saved at '{}' with {} rows.",
                path.display(),
                summary.rows_written
            );
        }
        PrepareOutcome::InputNotFound { path } => {
            println!("Input file not found at: {}", path.display());
        }
    }

    Ok(())
}
