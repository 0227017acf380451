//! Durable storage for the catalog.

mod snapshot;

pub use snapshot::SnapshotFile;
