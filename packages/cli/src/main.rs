#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive launcher for the energy risk toolchain.
//!
//! Lets users pick between preparing the processed table and starting the
//! dashboard, then hands off to the matching crate.

use dialoguer::{Confirm, Select};
use energy_risk_prepare::{PrepareConfig, PrepareOutcome};

/// Top-level tool selection.
enum Tool {
    Prepare,
    Dashboard,
    PrepareAndDashboard,
}

impl Tool {
    const ALL: &[Self] = &[Self::Prepare, Self::Dashboard, Self::PrepareAndDashboard];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Prepare => "Prepare data",
            Self::Dashboard => "Start dashboard",
            Self::PrepareAndDashboard => "Prepare data, then start dashboard",
        }
    }
}

/// Runs the preparation step with the default paths and reports the result.
///
/// Returns `true` if the processed table was written.
fn run_prepare() -> Result<bool, Box<dyn std::error::Error>> {
    let config = PrepareConfig::from_env();
    match energy_risk_prepare::prepare(&config)? {
        PrepareOutcome::Written { path, summary } => {
            println!(
                "File successfully saved at '{}' with {} rows.",
                path.display(),
                summary.rows_written
            );
            Ok(true)
        }
        PrepareOutcome::InputNotFound { path } => {
            println!("Input file not found at: {}", path.display());
            Ok(false)
        }
    }
}

fn run_dashboard() -> std::io::Result<()> {
    actix_web::rt::System::new().block_on(energy_risk_dashboard::interactive::run())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    println!("Energy Risk Toolchain");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Prepare => {
            run_prepare()?;
        }
        Tool::Dashboard => run_dashboard()?,
        Tool::PrepareAndDashboard => {
            let written = run_prepare()?;
            if !written {
                log::warn!("Preparation produced no output");
                let proceed = Confirm::new()
                    .with_prompt("Start the dashboard with the existing processed data?")
                    .default(false)
                    .interact()?;
                if !proceed {
                    return Ok(());
                }
            }
            run_dashboard()?;
        }
    }

    Ok(())
}
