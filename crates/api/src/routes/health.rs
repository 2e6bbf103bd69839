use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when catalog credentials are missing.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub credentials_configured: bool,
}

/// GET /health -- returns service status and whether downloads can work.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let credentials_configured = state.config.upstream.credentials().is_some();

    let status = if credentials_configured { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        credentials_configured,
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
