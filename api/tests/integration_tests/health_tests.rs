//! Integration tests for the health endpoint.
//!
//! Tests cover:
//! - Liveness response shape
//! - Scrape counter reporting
//! - Collector status reporting for successful and failing stores

use axum::http::StatusCode;

use super::common::{broken_app, get_json, get_text, post_empty, test_app};

#[tokio::test]
async fn test_health_check() {
    let (app, _store, _state) = test_app();

    let (status, response) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "ok");
    assert_eq!(response["service"], "calcmon-api");
    assert!(response["version"].is_string());
    assert_eq!(response["metrics_calls"], 0);
}

#[tokio::test]
async fn test_scrape_count_increments_per_scrape_only() {
    let (app, _store, _state) = test_app();

    // Two scrapes, one trigger, one health read in between.
    get_text(app.clone(), "/metrics").await;
    post_empty(app.clone(), "/collect-now").await;
    get_text(app.clone(), "/metrics").await;

    let (status, response) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["metrics_calls"], 2);
}

#[tokio::test]
async fn test_health_reports_failed_passes() {
    let (app, _state) = broken_app();

    // A failing trigger is still a recorded pass.
    let (status, _) = post_empty(app.clone(), "/collect-now").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, response) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["collector"]["passes_completed"], 0);
    assert_eq!(response["collector"]["passes_failed"], 1);
    assert!(response["collector"]["last_error"]
        .as_str()
        .unwrap()
        .contains("store offline"));
}

#[tokio::test]
async fn test_health_reports_successful_passes() {
    let (app, _store, _state) = test_app();

    post_empty(app.clone(), "/collect-now").await;
    post_empty(app.clone(), "/collect-now").await;

    let (_, response) = get_json(app, "/health").await;
    assert_eq!(response["collector"]["passes_completed"], 2);
    assert_eq!(response["collector"]["passes_failed"], 0);
    assert!(response["collector"]["last_success_at"].is_string());
    assert!(response["collector"]["last_error"].is_null());
}
