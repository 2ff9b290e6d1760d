//! Integration tests for the scrape endpoint.
//!
//! Tests cover:
//! - Exposition format and content type
//! - Published values after a pass over seeded rows
//! - Stale-label retention across passes

use axum::http::StatusCode;
use shared::chrono::{Duration, Utc};
use shared::models::{ActivityEvent, CalculationSummary, PerformanceSample};

use super::common::{get_text, post_empty, test_app};

#[tokio::test]
async fn test_scrape_empty_registry() {
    let (app, _store, _state) = test_app();

    let (status, content_type, body) = get_text(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.is_some_and(|ct| ct.starts_with("text/plain")));
    // No pass has run: no samples yet.
    assert!(!body.contains("calculator_calculations_total{"));
}

#[tokio::test]
async fn test_scrape_reflects_aggregated_window() {
    let (app, store, _state) = test_app();
    let now = Utc::now();

    store
        .insert_calculation(CalculationSummary::new(now - Duration::hours(23), 5, 2))
        .unwrap();
    store
        .insert_calculation(CalculationSummary::new(now - Duration::hours(21), 7, 1))
        .unwrap();
    store
        .insert_performance(PerformanceSample::new(now - Duration::hours(1), "add", 1.5))
        .unwrap();
    store
        .insert_activity(ActivityEvent::new(now - Duration::hours(1), "login"))
        .unwrap();

    let (status, _) = post_empty(app.clone(), "/collect-now").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = get_text(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("calculator_calculations_total{user_type=\"authenticated\"} 12"));
    assert!(body.contains("calculator_calculations_total{user_type=\"guest\"} 3"));
    assert!(body.contains("calculator_operation_avg_duration_ms{operation_type=\"add\"} 1.5"));
    assert!(body.contains("calculator_user_activity_total{activity_type=\"login\"} 1"));
}

#[tokio::test]
async fn test_vanished_label_keeps_last_value() {
    let (app, store, _state) = test_app();
    let now = Utc::now();

    store
        .insert_performance(PerformanceSample::new(now - Duration::hours(2), "add", 1.5))
        .unwrap();
    store
        .insert_performance(PerformanceSample::new(now - Duration::hours(2), "sub", 2.0))
        .unwrap();
    post_empty(app.clone(), "/collect-now").await;

    // The next window contains only "add" rows.
    store.clear().unwrap();
    store
        .insert_performance(PerformanceSample::new(now - Duration::hours(1), "add", 3.0))
        .unwrap();
    post_empty(app.clone(), "/collect-now").await;

    let (_, _, body) = get_text(app, "/metrics").await;
    assert!(body.contains("calculator_operation_avg_duration_ms{operation_type=\"add\"} 3"));
    assert!(body.contains("calculator_operation_avg_duration_ms{operation_type=\"sub\"} 2"));
}

#[tokio::test]
async fn test_scrape_includes_help_and_type_lines() {
    let (app, _store, _state) = test_app();
    post_empty(app.clone(), "/collect-now").await;

    let (_, _, body) = get_text(app, "/metrics").await;
    assert!(body.contains("# HELP calculator_calculations_total Total number of calculations"));
    assert!(body.contains("# TYPE calculator_calculations_total gauge"));
}
