//! Integration tests for the Calcmon API.
//!
//! These tests drive the full router: triggering aggregation passes over an
//! in-memory event store and reading the results back through the scrape and
//! health endpoints.

mod common;

mod collect_tests;
mod health_tests;
mod metrics_tests;
