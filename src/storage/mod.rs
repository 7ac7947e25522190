//! Storage module for persisting the graph snapshot
//!
//! The snapshot is the only durable state. It is written wholesale on every
//! rebuild and read wholesale by the serving layer; there are no partial
//! updates.

mod snapshot;

pub use snapshot::SnapshotStore;
