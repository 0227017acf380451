//! The catalog repository.
//!
//! [`CatalogStore`] owns the authoritative in-memory catalog and the
//! snapshot file backing it. Every write sequences
//! validate -> allocate -> mutate -> persist inside a single exclusive
//! critical section; reads share a lock and serve directly from memory.
//!
//! Mutations are staged on a copy of the catalog and committed to memory
//! only after the snapshot write succeeds, so a persistence failure leaves
//! the in-memory state identical to the last durable snapshot.

pub mod ident;

use crate::config::CardexConfig;
use crate::models::{ListFilter, Record, RecordDraft, RecordId};
use crate::storage::SnapshotFile;
use crate::validation::{ValidationMode, Validator};
use crate::{Error, Result};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Catalog and id allocation mark, guarded as one unit.
///
/// The mark is the highest id ever assigned in this store's lifetime. It
/// only grows, so an id freed by deleting the newest record is still never
/// handed out again.
struct CatalogState {
    records: Vec<Record>,
    last_id: u64,
}

/// Repository for catalog records.
///
/// Safe to share between concurrent callers; one instance owns both the
/// in-memory catalog and the backing file exclusively.
pub struct CatalogStore {
    validator: Validator,
    snapshot: SnapshotFile,
    state: RwLock<CatalogState>,
}

impl CatalogStore {
    /// Opens a store, loading the existing snapshot if present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStore`] if a snapshot exists but cannot be
    /// parsed. A missing snapshot is the bootstrap state, not an error.
    pub fn open(config: &CardexConfig) -> Result<Self> {
        let snapshot = SnapshotFile::new(&config.data_file);
        let records = snapshot.load()?;
        let last_id = ident::highest_id(&records);

        tracing::info!(
            path = %snapshot.path().display(),
            count = records.len(),
            "catalog opened"
        );

        Ok(Self {
            validator: Validator::from_config(config),
            snapshot,
            state: RwLock::new(CatalogState { records, last_id }),
        })
    }

    /// Lists records matching the filter, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error only if the lock is poisoned.
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<Record>> {
        let guard = self.read_guard("list")?;
        Ok(guard
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    /// Returns the number of records in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error only if the lock is poisoned.
    pub fn count(&self) -> Result<usize> {
        Ok(self.read_guard("count")?.records.len())
    }

    /// Validates a draft, assigns the next id, appends, and persists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a bad payload or
    /// [`Error::Persistence`] if the snapshot write fails; in either case
    /// the catalog is unchanged.
    pub fn create(&self, draft: RecordDraft) -> Result<Record> {
        let mut guard = self.write_guard("create")?;
        self.validator.check(&draft, ValidationMode::Create)?;

        let record = Record {
            // Allocation and append happen under the same write lock, so
            // two concurrent creates cannot compute the same id.
            id: ident::next_id(guard.last_id),
            // Required fields are present once validation passed.
            title: draft.title.unwrap_or_default(),
            category: draft.category.unwrap_or_default(),
            status: draft.status.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            value: draft.value.unwrap_or(0.0),
        };

        let mut next = guard.records.clone();
        next.push(record.clone());
        self.snapshot.save(&next)?;
        guard.records = next;
        guard.last_id = record.id.get();

        tracing::debug!(id = %record.id, "record created");
        Ok(record)
    }

    /// Overwrites all mutable fields of an existing record and persists.
    ///
    /// The id is untouched. An omitted value keeps the stored amount;
    /// an omitted description resets to empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`], [`Error::NotFound`], or
    /// [`Error::Persistence`]; the catalog is unchanged on failure.
    pub fn replace(&self, id: RecordId, draft: RecordDraft) -> Result<Record> {
        let mut guard = self.write_guard("replace")?;
        self.validator.check(&draft, ValidationMode::Replace)?;

        let pos = guard
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::NotFound(id))?;

        let record = Record {
            id,
            title: draft.title.unwrap_or_default(),
            category: draft.category.unwrap_or_default(),
            status: draft.status.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            value: draft.value.unwrap_or(guard.records[pos].value),
        };

        let mut next = guard.records.clone();
        next[pos] = record.clone();
        self.snapshot.save(&next)?;
        guard.records = next;

        tracing::debug!(id = %id, "record replaced");
        Ok(record)
    }

    /// Mutates only the status of an existing record and persists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a status outside the allowed set,
    /// [`Error::NotFound`], or [`Error::Persistence`].
    pub fn patch_status(&self, id: RecordId, status: &str) -> Result<Record> {
        let mut guard = self.write_guard("patch_status")?;

        let draft = RecordDraft::new().with_status(status);
        self.validator.check(&draft, ValidationMode::StatusPatch)?;

        let pos = guard
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::NotFound(id))?;

        let mut next = guard.records.clone();
        next[pos].status = status.to_string();
        self.snapshot.save(&next)?;
        let record = next[pos].clone();
        guard.records = next;

        tracing::debug!(id = %id, status, "record status patched");
        Ok(record)
    }

    /// Removes a record and persists the reduced catalog.
    ///
    /// The allocation mark is untouched, so the freed id is never
    /// assigned again by this store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has the id, or
    /// [`Error::Persistence`] if the snapshot write fails.
    pub fn delete(&self, id: RecordId) -> Result<()> {
        let mut guard = self.write_guard("delete")?;

        let pos = guard
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::NotFound(id))?;

        let mut next = guard.records.clone();
        next.remove(pos);
        self.snapshot.save(&next)?;
        guard.records = next;

        tracing::debug!(id = %id, "record deleted");
        Ok(())
    }

    fn read_guard(&self, operation: &str) -> Result<RwLockReadGuard<'_, CatalogState>> {
        self.state.read().map_err(|_| Error::Persistence {
            operation: operation.to_string(),
            cause: "lock poisoned".to_string(),
        })
    }

    fn write_guard(&self, operation: &str) -> Result<RwLockWriteGuard<'_, CatalogState>> {
        self.state.write().map_err(|_| Error::Persistence {
            operation: operation.to_string(),
            cause: "lock poisoned".to_string(),
        })
    }
}
