//! Configuration module for Calcmon.
//!
//! This module contains the collection schedule and lookback window settings.

pub mod collection;

pub use collection::{CollectionConfig, MAX_LOOKBACK_HOURS};
