//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers and
//! the collector at construction time. All process-wide mutable state (the
//! gauge registry, the collector, the scrape counter) lives here explicitly;
//! there is no module-level initialization order to get wrong. The store
//! handle is owned by the collector, the only component that queries it.

use shared::config::CollectionConfig;
use shared::storage::{EventStore, InMemoryEventStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::collector::Collector;
use crate::metrics::AppMetrics;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The gauge registry serialized by the scrape endpoint.
    metrics: Arc<AppMetrics>,
    /// The collector invoked by the scheduler and the trigger endpoint.
    collector: Arc<Collector>,
    /// Number of scrape requests served since startup.
    scrape_count: Arc<AtomicU64>,
}

impl AppState {
    /// Creates a new application state with the given store and settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the gauge registry cannot be constructed.
    pub fn new(store: Arc<dyn EventStore>, collection: CollectionConfig) -> anyhow::Result<Self> {
        let metrics = AppMetrics::new_shared()?;
        let collector = Arc::new(Collector::new(store, Arc::clone(&metrics), collection));

        Ok(Self {
            metrics,
            collector,
            scrape_count: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Creates a new application state with an in-memory event store.
    ///
    /// This is useful for development and testing.
    ///
    /// # Panics
    ///
    /// Panics if the gauge registry cannot be constructed, which only happens
    /// when metric names collide (a programming error).
    #[must_use]
    pub fn with_in_memory_store() -> Self {
        Self::new(
            InMemoryEventStore::new_shared(),
            CollectionConfig::default(),
        )
        .expect("fresh registry construction cannot fail")
    }

    /// Returns the gauge registry.
    #[must_use]
    pub fn metrics(&self) -> &AppMetrics {
        self.metrics.as_ref()
    }

    /// Returns the collector handle.
    #[must_use]
    pub fn collector(&self) -> Arc<Collector> {
        Arc::clone(&self.collector)
    }

    /// Increments the scrape counter and returns the new value.
    pub fn record_scrape(&self) -> u64 {
        self.scrape_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns the number of scrape requests served since startup.
    #[must_use]
    pub fn scrape_count(&self) -> u64 {
        self.scrape_count.load(Ordering::Relaxed)
    }
}
