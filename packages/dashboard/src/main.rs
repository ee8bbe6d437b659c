#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the energy risk dashboard server.

use std::path::PathBuf;

use clap::Parser;
use energy_risk_dashboard::{ServerConfig, interactive, run_server};

#[derive(Parser)]
#[command(
    name = "energy_risk_dashboard",
    about = "Interactive world map of 2022 energy risk"
)]
struct Cli {
    /// Processed CSV to serve (defaults to `ENERGY_RISK_PROCESSED_CSV` or
    /// `data/processed/data_preparation.csv`)
    #[arg(long)]
    data: Option<PathBuf>,
    /// Address to bind (defaults to `BIND_ADDR` or 127.0.0.1)
    #[arg(long)]
    bind: Option<String>,
    /// Port to listen on (defaults to `PORT` or 8050)
    #[arg(long)]
    port: Option<u16>,
    /// Prompt for the settings instead of reading flags
    #[arg(long)]
    interactive: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    if cli.interactive {
        return interactive::run().await;
    }

    let defaults = ServerConfig::from_env();
    run_server(ServerConfig {
        bind_addr: cli.bind.unwrap_or(defaults.bind_addr),
        port: cli.port.unwrap_or(defaults.port),
        data_path: cli.data.unwrap_or(defaults.data_path),
    })
    .await
}
