//! Interactive mode for the dashboard.
//!
//! Prompts the user for bind address, port and processed data path before
//! starting the server.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::ServerConfig;

/// Runs the dashboard in interactive mode, prompting for configuration.
///
/// Defaults come from [`ServerConfig::from_env`]. Delegates to
/// [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("Energy Risk Dashboard");
    println!();

    let defaults = ServerConfig::from_env();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let data_path: String = Input::new()
        .with_prompt("Processed data CSV")
        .default(defaults.data_path.display().to_string())
        .interact_text()
        .unwrap_or_else(|_| defaults.data_path.display().to_string());

    if !Confirm::new()
        .with_prompt(format!("Start dashboard on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(ServerConfig {
        bind_addr,
        port,
        data_path: PathBuf::from(data_path),
    })
    .await
}
