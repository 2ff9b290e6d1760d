//! Calcmon Shared Library
//!
//! This crate contains the types shared between the Calcmon monitoring
//! service and its tooling.
//!
//! # Modules
//!
//! - [`models`] - Row models for the event tables consumed by the collector
//! - [`storage`] - The `EventStore` trait and its implementations
//! - [`config`] - Collection interval and lookback window configuration
//!
//! # Example
//!
//! ```
//! use shared::models::{CalculationSummary, CalculationTotals};
//! use shared::chrono::Utc;
//!
//! let rows = vec![
//!     CalculationSummary::new(Utc::now(), 5, 2),
//!     CalculationSummary::new(Utc::now(), 7, 1),
//! ];
//!
//! let totals = CalculationTotals::from_summaries(&rows);
//! assert_eq!(totals.authenticated, 12);
//! assert_eq!(totals.guest, 3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod models;
pub mod storage;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
