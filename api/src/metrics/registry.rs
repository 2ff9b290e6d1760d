//! Prometheus gauge registry.
//!
//! The collector publishes the reduced scalars of each aggregation pass into
//! these gauges; the scrape endpoint serializes the full snapshot. Gauge
//! children are created lazily on first observation of a label value and are
//! never removed, so a label that disappears from the lookback window keeps
//! its last published value until the process exits.

use anyhow::Result;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Centralized Prometheus metrics for the monitoring service.
///
/// All gauges follow the `calculator_*` naming of the upstream dashboards.
pub struct AppMetrics {
    /// Prometheus registry backing the scrape snapshot.
    registry: Registry,
    /// Calculations in the window, labeled by user type
    /// ("authenticated" / "guest").
    pub calculations_total: GaugeVec,
    /// Average operation duration in milliseconds, labeled by operation type.
    pub operation_avg_duration_ms: GaugeVec,
    /// Activity events in the window, labeled by activity type.
    pub user_activity_total: GaugeVec,
}

impl AppMetrics {
    /// Create and register all gauges.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric cannot be constructed or registered
    /// (duplicate names within one registry).
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let calculations_total = GaugeVec::new(
            Opts::new(
                "calculator_calculations_total",
                "Total number of calculations",
            ),
            &["user_type"],
        )?;

        let operation_avg_duration_ms = GaugeVec::new(
            Opts::new(
                "calculator_operation_avg_duration_ms",
                "Average operation duration in ms",
            ),
            &["operation_type"],
        )?;

        let user_activity_total = GaugeVec::new(
            Opts::new("calculator_user_activity_total", "User activity count"),
            &["activity_type"],
        )?;

        registry.register(Box::new(calculations_total.clone()))?;
        registry.register(Box::new(operation_avg_duration_ms.clone()))?;
        registry.register(Box::new(user_activity_total.clone()))?;

        Ok(Self {
            registry,
            calculations_total,
            operation_avg_duration_ms,
            user_activity_total,
        })
    }

    /// Create a new registry wrapped in an Arc.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric cannot be constructed or registered.
    pub fn new_shared() -> Result<Arc<Self>> {
        Ok(Arc::new(Self::new()?))
    }

    /// Serialize the full current snapshot in the exposition text format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn encode(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// The content type of the exposition text format.
    #[must_use]
    pub fn content_type() -> &'static str {
        prometheus::TEXT_FORMAT
    }
}
