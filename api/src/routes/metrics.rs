//! Scrape endpoint.
//!
//! Serves the full gauge snapshot in the Prometheus exposition text format
//! and counts every scrape request.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::metrics::AppMetrics;
use crate::state::AppState;

/// Creates the scrape routes.
pub fn metrics_routes(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(scrape))
        .with_state(state)
}

/// Scrape handler.
///
/// Serializes the registry's current snapshot. Each request increments the
/// scrape counter by exactly one, regardless of what the collector is doing.
async fn scrape(State(state): State<AppState>) -> Response {
    state.record_scrape();

    match state.metrics().encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, AppMetrics::content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics snapshot");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to encode metrics".to_string(),
            )
                .into_response()
        }
    }
}
