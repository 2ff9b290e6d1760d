//! Periodic aggregation of business metrics.
//!
//! The [`Collector`] runs one "pass" at a time: it computes the lookback
//! window bound, executes the three read-only store queries sequentially, and
//! publishes the reduced scalars into the gauge registry. A scheduling loop
//! fires a pass immediately at startup and then after every configured
//! interval, measured from the end of the previous pass so passes never
//! overlap. Pass outcomes are recorded in a [`CollectorStatus`] so failures
//! are observable without a log viewer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::config::CollectionConfig;
use shared::models::CalculationTotals;
use shared::storage::{EventStore, EventStoreError};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::metrics::AppMetrics;

/// Label values published under `calculator_calculations_total`.
const USER_TYPE_AUTHENTICATED: &str = "authenticated";
const USER_TYPE_GUEST: &str = "guest";

/// Running totals of pass outcomes, reported by the health endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorStatus {
    /// Number of passes that completed successfully.
    pub passes_completed: u64,
    /// Number of passes that failed.
    pub passes_failed: u64,
    /// When the last successful pass finished.
    pub last_success_at: Option<DateTime<Utc>>,
    /// Message of the most recent failure, if any.
    pub last_error: Option<String>,
    /// When the most recent failure occurred.
    pub last_error_at: Option<DateTime<Utc>>,
}

/// Aggregates event rows from the store and publishes gauge values.
pub struct Collector {
    store: Arc<dyn EventStore>,
    metrics: Arc<AppMetrics>,
    config: CollectionConfig,
    status: RwLock<CollectorStatus>,
}

impl Collector {
    /// Creates a new collector.
    ///
    /// # Arguments
    ///
    /// * `store` - The event store to query
    /// * `metrics` - The gauge registry to publish into
    /// * `config` - Interval and lookback window settings
    #[must_use]
    pub fn new(
        store: Arc<dyn EventStore>,
        metrics: Arc<AppMetrics>,
        config: CollectionConfig,
    ) -> Self {
        Self {
            store,
            metrics,
            config,
            status: RwLock::new(CollectorStatus::default()),
        }
    }

    /// Returns a snapshot of the pass outcome counters.
    pub async fn status(&self) -> CollectorStatus {
        self.status.read().await.clone()
    }

    /// Runs one aggregation pass and records its outcome.
    ///
    /// This is the entry point for both the scheduled loop and the on-demand
    /// trigger endpoint; the trigger propagates the returned error to its
    /// caller while the loop only logs it.
    ///
    /// # Errors
    ///
    /// Returns the first query error encountered. A failed pass performs no
    /// gauge mutations; previously published values stay in place.
    pub async fn run_pass(&self) -> Result<(), EventStoreError> {
        let result = self.collect_once().await;
        let mut status = self.status.write().await;

        match &result {
            Ok(()) => {
                status.passes_completed += 1;
                status.last_success_at = Some(Utc::now());
            }
            Err(e) => {
                status.passes_failed += 1;
                status.last_error = Some(e.to_string());
                status.last_error_at = Some(Utc::now());
                tracing::error!(error = %e, "Aggregation pass failed");
            }
        }

        result
    }

    /// Executes the three queries of one pass and publishes the results.
    ///
    /// The queries run sequentially and short-circuit: if the first fails,
    /// the remaining two are never attempted in that pass.
    async fn collect_once(&self) -> Result<(), EventStoreError> {
        let since = self.config.window_start(Utc::now());

        let summaries = self.store.calculation_summaries(since).await?;
        let totals = CalculationTotals::from_summaries(&summaries);

        let durations = self.store.operation_durations(since).await?;
        let activities = self.store.activity_counts(since).await?;

        #[allow(clippy::cast_precision_loss)]
        {
            self.metrics
                .calculations_total
                .with_label_values(&[USER_TYPE_AUTHENTICATED])
                .set(totals.authenticated as f64);
            self.metrics
                .calculations_total
                .with_label_values(&[USER_TYPE_GUEST])
                .set(totals.guest as f64);

            for row in &durations {
                self.metrics
                    .operation_avg_duration_ms
                    .with_label_values(&[row.operation_type.as_str()])
                    .set(row.avg_duration_ms);
            }

            for row in &activities {
                self.metrics
                    .user_activity_total
                    .with_label_values(&[row.activity_type.as_str()])
                    .set(row.count as f64);
            }
        }

        tracing::info!(
            since = %since,
            authenticated = totals.authenticated,
            guest = totals.guest,
            operation_types = durations.len(),
            activity_types = activities.len(),
            "Aggregation pass completed"
        );

        Ok(())
    }

    /// Runs the periodic collection loop.
    ///
    /// Fires one pass immediately, then waits the configured interval after
    /// each pass finishes before starting the next. Pass failures are logged
    /// and counted but never terminate the loop.
    pub async fn run(self: Arc<Self>) {
        let interval = self.config.interval();
        tracing::info!(
            interval_secs = self.config.interval_secs,
            lookback_hours = self.config.lookback_hours,
            "Starting periodic metrics collection"
        );

        loop {
            // Outcome already logged and recorded by run_pass.
            let _ = self.run_pass().await;
            tokio::time::sleep(interval).await;
        }
    }
}
