//! Identifier allocation.

use crate::models::{Record, RecordId};

/// Returns the highest id present in a catalog, or `0` when empty.
///
/// Used to seed the store's allocation mark from a loaded snapshot.
#[must_use]
pub fn highest_id(catalog: &[Record]) -> u64 {
    catalog.iter().map(|r| r.id.get()).max().unwrap_or(0)
}

/// Returns the id following the given allocation mark.
///
/// The mark is the highest id ever assigned in this store's lifetime, not
/// the current catalog maximum: ids freed by deletion are never reused, so
/// any two records ever created by one store have distinct ids. Callers
/// must hold the write lock so the computed id cannot race with a
/// concurrent append.
#[must_use]
pub const fn next_id(last_assigned: u64) -> RecordId {
    RecordId::new(last_assigned + 1)
}
