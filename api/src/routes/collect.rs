//! On-demand collection trigger endpoint.
//!
//! Runs one synchronous aggregation pass and blocks the caller until its
//! three queries finish. Unlike the scheduled loop, a failure here is
//! returned to the requester instead of only being logged.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Acknowledgement returned when a triggered pass completes.
#[derive(Debug, Serialize)]
pub struct CollectResponse {
    /// Always "collected" on success.
    pub status: &'static str,
}

/// Error body returned when a triggered pass fails.
#[derive(Debug, Serialize, Deserialize)]
pub struct CollectError {
    /// Error kind.
    pub error: String,
    /// Human-readable failure description.
    pub message: String,
}

/// Creates the trigger routes.
pub fn collect_routes(state: AppState) -> Router {
    Router::new()
        .route("/collect-now", post(collect_now))
        .with_state(state)
}

/// Handler for POST /collect-now.
async fn collect_now(State(state): State<AppState>) -> Response {
    match state.collector().run_pass().await {
        Ok(()) => Json(CollectResponse {
            status: "collected",
        })
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(CollectError {
                error: "collection_failed".to_string(),
                message: e.to_string(),
            }),
        )
            .into_response(),
    }
}
