//! Data models for the event tables consumed by the collector.

pub mod events;

pub use events::{
    ActivityCount, ActivityEvent, CalculationSummary, CalculationTotals, OperationDuration,
    PerformanceSample,
};
