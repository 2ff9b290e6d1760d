//! Common test utilities and helpers for integration tests.

use api::{create_router, AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use shared::chrono::{DateTime, Utc};
use shared::config::CollectionConfig;
use shared::models::{ActivityCount, CalculationSummary, OperationDuration};
use shared::storage::{EventStore, EventStoreError, InMemoryEventStore};
use std::sync::Arc;

/// Creates a test router backed by a fresh in-memory event store.
///
/// Returns the router, the store (for seeding rows between passes), and the
/// app state (for inspecting counters).
pub fn test_app() -> (Router, Arc<InMemoryEventStore>, AppState) {
    let store = InMemoryEventStore::new_shared();
    let state = AppState::new(Arc::clone(&store) as Arc<dyn EventStore>, CollectionConfig::default())
        .expect("state construction");
    let router = create_router(state.clone());
    (router, store, state)
}

/// An event store whose every query fails, for exercising the error paths.
pub struct BrokenStore;

#[async_trait]
impl EventStore for BrokenStore {
    async fn calculation_summaries(
        &self,
        _since: DateTime<Utc>,
    ) -> Result<Vec<CalculationSummary>, EventStoreError> {
        Err(EventStoreError::QueryError("store offline".to_string()))
    }

    async fn operation_durations(
        &self,
        _since: DateTime<Utc>,
    ) -> Result<Vec<OperationDuration>, EventStoreError> {
        Err(EventStoreError::QueryError("store offline".to_string()))
    }

    async fn activity_counts(
        &self,
        _since: DateTime<Utc>,
    ) -> Result<Vec<ActivityCount>, EventStoreError> {
        Err(EventStoreError::QueryError("store offline".to_string()))
    }
}

/// Creates a test router whose store fails every query.
pub fn broken_app() -> (Router, AppState) {
    let state = AppState::new(Arc::new(BrokenStore), CollectionConfig::default())
        .expect("state construction");
    let router = create_router(state.clone());
    (router, state)
}

/// Helper to make a GET request, parsing the body as JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Helper to make a GET request, returning the body as text plus the
/// content type.
pub async fn get_text(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (
        status,
        content_type,
        String::from_utf8(body_bytes.to_vec()).unwrap(),
    )
}

/// Helper to make an empty POST request, parsing the body as JSON.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}
