use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether a catalog snapshot has been loaded.
    pub catalog_loaded: bool,
    /// Age of the loaded snapshot in whole seconds.
    pub catalog_age_secs: Option<i64>,
}

/// GET /health -- returns service and catalog cache health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let age = state.catalog.age().await;

    let status = if age.is_some() { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        catalog_loaded: age.is_some(),
        catalog_age_secs: age.map(|age| age.num_seconds()),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
