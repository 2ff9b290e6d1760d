//! Collection schedule and lookback window configuration.
//!
//! Defines how often the collector runs and how far back each aggregation
//! pass looks when filtering event rows.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest accepted lookback window. Keeps the window arithmetic (and its
/// nanosecond representation in store queries) well inside chrono's range.
pub const MAX_LOOKBACK_HOURS: u32 = 24 * 365;

/// Configuration for the periodic collection loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Seconds to wait between the end of one pass and the start of the next.
    pub interval_secs: u64,
    /// Size of the lookback window in hours.
    pub lookback_hours: u32,
}

impl CollectionConfig {
    /// Creates a new collection configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use shared::config::CollectionConfig;
    ///
    /// let config = CollectionConfig::new(60, 24);
    /// assert_eq!(config.interval().as_secs(), 60);
    /// ```
    #[must_use]
    pub fn new(interval_secs: u64, lookback_hours: u32) -> Self {
        Self {
            interval_secs,
            lookback_hours,
        }
    }

    /// Returns the pause between passes as a `Duration`.
    ///
    /// The interval is measured from the end of one pass to the start of the
    /// next, so passes never overlap.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Computes the inclusive lower bound of the lookback window for a pass
    /// starting at `now`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shared::config::CollectionConfig;
    /// use shared::chrono::Utc;
    ///
    /// let config = CollectionConfig::default();
    /// let now = Utc::now();
    /// let since = config.window_start(now);
    /// assert_eq!((now - since).num_hours(), 24);
    /// ```
    #[must_use]
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - ChronoDuration::hours(i64::from(self.lookback_hours))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero, or the lookback window is
    /// zero or exceeds [`MAX_LOOKBACK_HOURS`].
    pub fn validate(&self) -> Result<(), String> {
        if self.interval_secs == 0 {
            return Err("Collection interval must be greater than zero".to_string());
        }
        if self.lookback_hours == 0 {
            return Err("Lookback window must be greater than zero".to_string());
        }
        if self.lookback_hours > MAX_LOOKBACK_HOURS {
            return Err(format!(
                "Lookback window must be at most {MAX_LOOKBACK_HOURS} hours"
            ));
        }
        Ok(())
    }
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            lookback_hours: 24,
        }
    }
}
