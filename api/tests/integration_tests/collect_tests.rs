//! Integration tests for the on-demand trigger endpoint.
//!
//! Tests cover:
//! - Synchronous acknowledgement
//! - Error propagation to the requester
//! - All-or-nothing publication on failure

use axum::http::StatusCode;
use shared::chrono::{Duration, Utc};
use shared::models::CalculationSummary;

use super::common::{broken_app, get_text, post_empty, test_app};

#[tokio::test]
async fn test_trigger_returns_acknowledgement() {
    let (app, _store, _state) = test_app();

    let (status, response) = post_empty(app, "/collect-now").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "collected");
}

#[tokio::test]
async fn test_trigger_failure_propagates_to_requester() {
    let (app, _state) = broken_app();

    let (status, response) = post_empty(app, "/collect-now").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response["error"], "collection_failed");
    assert!(response["message"].as_str().unwrap().contains("store offline"));
}

#[tokio::test]
async fn test_failed_pass_publishes_nothing() {
    let (app, _state) = broken_app();

    post_empty(app.clone(), "/collect-now").await;

    let (status, _, body) = get_text(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("user_type="));
    assert!(!body.contains("operation_type="));
    assert!(!body.contains("activity_type="));
}

#[tokio::test]
async fn test_repeated_triggers_overwrite_wholesale() {
    let (app, store, _state) = test_app();
    let now = Utc::now();

    store
        .insert_calculation(CalculationSummary::new(now - Duration::hours(2), 5, 2))
        .unwrap();
    post_empty(app.clone(), "/collect-now").await;

    store
        .insert_calculation(CalculationSummary::new(now - Duration::hours(1), 7, 1))
        .unwrap();
    post_empty(app.clone(), "/collect-now").await;

    // Second pass sees both rows; the gauge holds the new total, not a merge.
    let (_, _, body) = get_text(app, "/metrics").await;
    assert!(body.contains("calculator_calculations_total{user_type=\"authenticated\"} 12"));
    assert!(body.contains("calculator_calculations_total{user_type=\"guest\"} 3"));
}
