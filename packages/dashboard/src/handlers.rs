//! HTTP handler functions for the energy risk dashboard.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use energy_risk_dashboard_models::{ApiCountrySummary, ApiEventRequest, ApiHealth, ViewState};

use crate::AppState;
use crate::render::{render, render_state};

/// The single-page dashboard client.
const INDEX_HTML: &str = include_str!("../app/index.html");

/// `GET /`
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        countries: state.dataset.len(),
    })
}

/// `GET /api/view`
///
/// Returns the idle view: default map, empty detail panels.
pub async fn view(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(render_state(&ViewState::Idle, &state.dataset))
}

/// `POST /api/event`
///
/// Applies a click or reset to the state the client sends back and
/// returns the complete next view. A request with neither trigger
/// re-renders the given state.
pub async fn event(state: web::Data<AppState>, body: web::Json<ApiEventRequest>) -> HttpResponse {
    let body = body.into_inner();
    let current = body.state.clone();

    let view = match body.into_event() {
        Some(event) => render(&current, &event, &state.dataset),
        None => render_state(&current, &state.dataset),
    };

    HttpResponse::Ok().json(view)
}

/// Turns an unreadable JSON request body into a `400` with a JSON
/// `{"error": ...}` body.
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    log::debug!("Rejected request body: {message}");
    let response = HttpResponse::BadRequest().json(serde_json::json!({ "error": message }));
    InternalError::from_response(err, response).into()
}

/// `GET /api/countries`
///
/// Lists every loaded country with its risk sum.
pub async fn countries(state: web::Data<AppState>) -> HttpResponse {
    let list: Vec<ApiCountrySummary> = state
        .dataset
        .records()
        .iter()
        .map(ApiCountrySummary::from)
        .collect();
    HttpResponse::Ok().json(list)
}

/// `GET /api/countries/{iso}`
///
/// Returns the full processed record for one country.
pub async fn country(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let iso_code = path.into_inner();
    match state.dataset.get(&iso_code) {
        Some(record) => HttpResponse::Ok().json(record),
        None => {
            log::debug!("No processed record for {iso_code}");
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Unknown ISO code: {iso_code}")
            }))
        }
    }
}
