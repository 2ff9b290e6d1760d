//! API route definitions.
//!
//! This module organizes all HTTP routes for the Calcmon API server.

mod collect;
mod health;
mod metrics;

pub use collect::collect_routes;
pub use health::health_routes;
pub use metrics::metrics_routes;
