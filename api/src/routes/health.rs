//! Health check endpoint.
//!
//! Reports process liveness, the scrape-request counter, and the collector's
//! pass outcome counters so a persistently failing store is visible without
//! attaching a log viewer.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::collector::CollectorStatus;
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status (always "ok" if reachable).
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Number of scrape requests served since startup.
    pub metrics_calls: u64,
    /// Outcome counters of the aggregation passes.
    pub collector: CollectorStatus,
}

/// Creates the health check routes.
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check handler.
///
/// Returns liveness plus the scrape counter and collector status. The scrape
/// counter only counts `/metrics` requests; this endpoint does not touch it.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let collector = state.collector().status().await;

    Json(HealthResponse {
        status: "ok",
        service: "calcmon-api",
        version: env!("CARGO_PKG_VERSION"),
        metrics_calls: state.scrape_count(),
        collector,
    })
}
