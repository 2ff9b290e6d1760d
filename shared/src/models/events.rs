//! Row models for the three event tables read during an aggregation pass.
//!
//! The collector consumes three read-only tables: `calculation_metrics`
//! (per-interval calculation counts), `performance_metrics` (raw operation
//! timings, averaged per operation type by the store), and `user_activity`
//! (raw activity events, counted per activity type by the store).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `calculation_metrics` table.
///
/// Each row records how many calculations were performed in a recording
/// interval, split by user type. A pass reduces all rows in the lookback
/// window into a single [`CalculationTotals`] by summation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationSummary {
    /// When the counts were recorded.
    pub recorded_at: DateTime<Utc>,
    /// Calculations performed by authenticated users.
    pub authenticated: u64,
    /// Calculations performed by guests.
    pub guest: u64,
}

impl CalculationSummary {
    /// Creates a new calculation summary row.
    #[must_use]
    pub fn new(recorded_at: DateTime<Utc>, authenticated: u64, guest: u64) -> Self {
        Self {
            recorded_at,
            authenticated,
            guest,
        }
    }
}

/// Window totals reduced from [`CalculationSummary`] rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationTotals {
    /// Sum of `authenticated` over all rows in the window.
    pub authenticated: u64,
    /// Sum of `guest` over all rows in the window.
    pub guest: u64,
}

impl CalculationTotals {
    /// Sums the per-row counts into window totals.
    ///
    /// The reduction is a plain summation; an empty window yields zero for
    /// both totals.
    #[must_use]
    pub fn from_summaries(rows: &[CalculationSummary]) -> Self {
        rows.iter().fold(Self::default(), |acc, row| Self {
            authenticated: acc.authenticated + row.authenticated,
            guest: acc.guest + row.guest,
        })
    }
}

/// One pre-aggregated row of the operation-duration query.
///
/// The store performs the averaging; one row is returned per distinct
/// operation type observed in the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDuration {
    /// The operation type (e.g., "add", "sub").
    pub operation_type: String,
    /// Average duration of the operation in milliseconds.
    pub avg_duration_ms: f64,
}

impl OperationDuration {
    /// Creates a new operation-duration row.
    #[must_use]
    pub fn new(operation_type: impl Into<String>, avg_duration_ms: f64) -> Self {
        Self {
            operation_type: operation_type.into(),
            avg_duration_ms,
        }
    }
}

/// One pre-aggregated row of the activity-count query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCount {
    /// The activity type (e.g., "login", "calculation").
    pub activity_type: String,
    /// Number of events of this type in the window.
    pub count: u64,
}

impl ActivityCount {
    /// Creates a new activity-count row.
    #[must_use]
    pub fn new(activity_type: impl Into<String>, count: u64) -> Self {
        Self {
            activity_type: activity_type.into(),
            count,
        }
    }
}

/// A raw row of the `performance_metrics` table.
///
/// The production queries never return these directly (the store averages
/// them); the in-memory store accepts them so tests can exercise the same
/// grouping the SQL performs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSample {
    /// When the operation was recorded.
    pub recorded_at: DateTime<Utc>,
    /// The operation type.
    pub operation_type: String,
    /// Duration of this single operation in milliseconds.
    pub duration_ms: f64,
}

impl PerformanceSample {
    /// Creates a new performance sample.
    #[must_use]
    pub fn new(
        recorded_at: DateTime<Utc>,
        operation_type: impl Into<String>,
        duration_ms: f64,
    ) -> Self {
        Self {
            recorded_at,
            operation_type: operation_type.into(),
            duration_ms,
        }
    }
}

/// A raw row of the `user_activity` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// When the activity occurred.
    pub recorded_at: DateTime<Utc>,
    /// The activity type.
    pub activity_type: String,
}

impl ActivityEvent {
    /// Creates a new activity event.
    #[must_use]
    pub fn new(recorded_at: DateTime<Utc>, activity_type: impl Into<String>) -> Self {
        Self {
            recorded_at,
            activity_type: activity_type.into(),
        }
    }
}
