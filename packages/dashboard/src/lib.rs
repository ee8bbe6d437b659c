#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web dashboard for the energy risk table.
//!
//! Loads the processed CSV once at startup into a read-only [`Dataset`]
//! and serves a single-page client plus a small JSON API. The client
//! renders a `risk_sum` choropleth; clicking a country or pressing reset
//! posts an event to `/api/event` and redraws from the returned view model.
//! All view state travels with the request, so the server keeps none.

pub mod dataset;
pub mod format;
mod handlers;
pub mod interactive;
pub mod render;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use energy_risk_models::paths;

pub use dataset::{Dataset, DatasetError};

/// Shared application state.
pub struct AppState {
    /// Processed energy table, read-only for the life of the process.
    pub dataset: Arc<Dataset>,
}

/// Where to listen and what to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Processed CSV to load.
    pub data_path: PathBuf,
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT` and `ENERGY_RISK_PROCESSED_CSV`, falling
    /// back to `127.0.0.1:8050` and the canonical processed path.
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8050);

        Self {
            bind_addr,
            port,
            data_path: paths::processed_csv_path(),
        }
    }
}

/// Registers the dashboard routes and the JSON body error handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handlers::json_error))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/view", web::get().to(handlers::view))
                .route("/event", web::post().to(handlers::event))
                .route("/countries", web::get().to(handlers::countries))
                .route("/countries/{iso}", web::get().to(handlers::country)),
        )
        .route("/", web::get().to(handlers::index));
}

/// Starts the dashboard server.
///
/// Loads the processed table from `config.data_path` and serves until the
/// process is terminated. This is a regular async function; the caller
/// provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an error if the processed table cannot be loaded, or if the HTTP
/// server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!("Loading processed data from {}...", config.data_path.display());
    let dataset = Dataset::load(&config.data_path).map_err(|e| {
        log::error!("Failed to load processed data: {e}");
        std::io::Error::other(e)
    })?;

    if dataset.is_empty() {
        log::warn!("Processed data contains no countries");
    } else if let Some((min, max)) = dataset.risk_range() {
        log::info!("Risk sum range across {} countries: {min}-{max}", dataset.len());
    }

    let state = web::Data::new(AppState {
        dataset: Arc::new(dataset),
    });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}
