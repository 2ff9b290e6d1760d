//! Storage traits and implementations.
//!
//! This module provides the abstraction over the relational event store the
//! collector reads from. The `EventStore` trait defines the three read-only
//! queries of an aggregation pass, allowing different implementations
//! (in-memory for development and testing, `ClickHouse` for production).

pub mod event_store;

pub use event_store::{ClickHouseEventStore, EventStore, EventStoreError, InMemoryEventStore};
