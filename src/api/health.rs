//! Liveness endpoint for the hosting platform's health check.
//!
//! Provides:
//! - `/health` — static "running" + version (for load balancers)

use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness check (for load balancers)
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Create health routes
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}
