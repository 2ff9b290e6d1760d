//! Event store trait and implementations.
//!
//! Provides the `EventStore` trait for the three window-bounded queries of an
//! aggregation pass, an `InMemoryEventStore` implementation for development
//! and testing, and a `ClickHouseEventStore` implementation for production.

use crate::models::{
    ActivityCount, ActivityEvent, CalculationSummary, OperationDuration, PerformanceSample,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors that can occur during event store operations.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// Failed to acquire lock on the store.
    #[error("Failed to acquire lock on event store")]
    LockError,

    /// A query against the backing store failed.
    #[error("Query error: {0}")]
    QueryError(String),
}

/// Trait for read-only access to the event tables.
///
/// Each method covers one of the three queries of an aggregation pass; all of
/// them filter by `recorded_at >= since` (the inclusive lower bound of the
/// lookback window). Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Fetches calculation summary rows recorded at or after `since`,
    /// ordered by recording time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn calculation_summaries(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<CalculationSummary>, EventStoreError>;

    /// Fetches the average operation duration per operation type over the
    /// window. One row per distinct operation type; the store performs the
    /// averaging.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn operation_durations(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<OperationDuration>, EventStoreError>;

    /// Fetches the event count per activity type over the window. One row
    /// per distinct activity type; the store performs the counting.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn activity_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityCount>, EventStoreError>;
}

/// In-memory event store implementation.
///
/// Holds raw rows and performs the same grouping the production SQL performs,
/// so tests exercise identical reduction semantics.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    calculations: Arc<RwLock<Vec<CalculationSummary>>>,
    performance: Arc<RwLock<Vec<PerformanceSample>>>,
    activity: Arc<RwLock<Vec<ActivityEvent>>>,
}

impl InMemoryEventStore {
    /// Creates a new empty in-memory event store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory event store wrapped in an Arc.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Inserts a calculation summary row.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn insert_calculation(&self, row: CalculationSummary) -> Result<(), EventStoreError> {
        let mut rows = self
            .calculations
            .write()
            .map_err(|_| EventStoreError::LockError)?;
        rows.push(row);
        Ok(())
    }

    /// Inserts a raw performance sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn insert_performance(&self, row: PerformanceSample) -> Result<(), EventStoreError> {
        let mut rows = self
            .performance
            .write()
            .map_err(|_| EventStoreError::LockError)?;
        rows.push(row);
        Ok(())
    }

    /// Inserts a raw activity event.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn insert_activity(&self, row: ActivityEvent) -> Result<(), EventStoreError> {
        let mut rows = self
            .activity
            .write()
            .map_err(|_| EventStoreError::LockError)?;
        rows.push(row);
        Ok(())
    }

    /// Removes all rows from all three tables.
    ///
    /// # Errors
    ///
    /// Returns an error if a store lock is poisoned.
    pub fn clear(&self) -> Result<(), EventStoreError> {
        self.calculations
            .write()
            .map_err(|_| EventStoreError::LockError)?
            .clear();
        self.performance
            .write()
            .map_err(|_| EventStoreError::LockError)?
            .clear();
        self.activity
            .write()
            .map_err(|_| EventStoreError::LockError)?
            .clear();
        Ok(())
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn calculation_summaries(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<CalculationSummary>, EventStoreError> {
        let rows = self
            .calculations
            .read()
            .map_err(|_| EventStoreError::LockError)?;

        let mut result: Vec<CalculationSummary> = rows
            .iter()
            .filter(|r| r.recorded_at >= since)
            .cloned()
            .collect();
        result.sort_by_key(|r| r.recorded_at);
        Ok(result)
    }

    async fn operation_durations(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<OperationDuration>, EventStoreError> {
        let rows = self
            .performance
            .read()
            .map_err(|_| EventStoreError::LockError)?;

        // Group samples by operation type and average, as AVG .. GROUP BY does.
        let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for sample in rows.iter().filter(|r| r.recorded_at >= since) {
            let entry = groups.entry(sample.operation_type.clone()).or_insert((0.0, 0));
            entry.0 += sample.duration_ms;
            entry.1 += 1;
        }

        let rows = groups
            .into_iter()
            .map(|(operation_type, (sum, count))| {
                // Precision loss is negligible for sample counts at this scale
                #[allow(clippy::cast_precision_loss)]
                let avg = sum / count as f64;
                OperationDuration::new(operation_type, avg)
            })
            .collect();
        Ok(rows)
    }

    async fn activity_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityCount>, EventStoreError> {
        let rows = self
            .activity
            .read()
            .map_err(|_| EventStoreError::LockError)?;

        let mut groups: BTreeMap<String, u64> = BTreeMap::new();
        for event in rows.iter().filter(|r| r.recorded_at >= since) {
            *groups.entry(event.activity_type.clone()).or_insert(0) += 1;
        }

        Ok(groups
            .into_iter()
            .map(|(activity_type, count)| ActivityCount::new(activity_type, count))
            .collect())
    }
}

/// `ClickHouse`-backed event store implementation.
///
/// Runs the three read-only analytical queries against the production event
/// tables. Timestamps are stored as nanoseconds since the Unix epoch.
#[derive(Clone)]
pub struct ClickHouseEventStore {
    client: Arc<clickhouse::Client>,
}

impl ClickHouseEventStore {
    /// Creates a new `ClickHouse` event store with the given client.
    #[must_use]
    pub fn new(client: Arc<clickhouse::Client>) -> Self {
        Self { client }
    }

    /// Creates a new `ClickHouse` event store wrapped in an Arc.
    #[must_use]
    pub fn new_shared(client: Arc<clickhouse::Client>) -> Arc<Self> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl EventStore for ClickHouseEventStore {
    async fn calculation_summaries(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<CalculationSummary>, EventStoreError> {
        #[derive(clickhouse::Row, serde::Deserialize)]
        struct Row {
            recorded_at: i64,
            authenticated_calculations: u64,
            guest_calculations: u64,
        }

        let rows: Vec<Row> = self
            .client
            .query(
                "SELECT recorded_at, authenticated_calculations, guest_calculations \
                 FROM calculation_metrics \
                 WHERE recorded_at >= ? \
                 ORDER BY recorded_at",
            )
            .bind(since.timestamp_nanos_opt().unwrap_or(0))
            .fetch_all::<Row>()
            .await
            .map_err(|e| EventStoreError::QueryError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                CalculationSummary::new(
                    DateTime::from_timestamp_nanos(row.recorded_at),
                    row.authenticated_calculations,
                    row.guest_calculations,
                )
            })
            .collect())
    }

    async fn operation_durations(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<OperationDuration>, EventStoreError> {
        #[derive(clickhouse::Row, serde::Deserialize)]
        struct Row {
            operation_type: String,
            avg_duration: f64,
        }

        let rows: Vec<Row> = self
            .client
            .query(
                "SELECT operation_type, avg(duration_ms) AS avg_duration \
                 FROM performance_metrics \
                 WHERE recorded_at >= ? \
                 GROUP BY operation_type",
            )
            .bind(since.timestamp_nanos_opt().unwrap_or(0))
            .fetch_all::<Row>()
            .await
            .map_err(|e| EventStoreError::QueryError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| OperationDuration::new(row.operation_type, row.avg_duration))
            .collect())
    }

    async fn activity_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityCount>, EventStoreError> {
        #[derive(clickhouse::Row, serde::Deserialize)]
        struct Row {
            activity_type: String,
            count: u64,
        }

        let rows: Vec<Row> = self
            .client
            .query(
                "SELECT activity_type, count() AS count \
                 FROM user_activity \
                 WHERE recorded_at >= ? \
                 GROUP BY activity_type",
            )
            .bind(since.timestamp_nanos_opt().unwrap_or(0))
            .fetch_all::<Row>()
            .await
            .map_err(|e| EventStoreError::QueryError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| ActivityCount::new(row.activity_type, row.count))
            .collect())
    }
}
