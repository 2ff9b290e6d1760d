//! Metric registry module.
//!
//! Holds the Prometheus gauges the collector publishes into and the
//! exposition-format serialization used by the scrape endpoint.

pub mod registry;

pub use registry::AppMetrics;
