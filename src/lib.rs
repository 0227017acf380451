//! # Cardex
//!
//! A file-backed catalog service for typed product records.
//!
//! Cardex stores uniquely-identified records (title, category, status,
//! description, monetary value) in an in-memory catalog that is durably
//! synchronized with a single on-disk JSON snapshot on every mutation.
//! Snapshot writes are atomic with respect to crashes, and the catalog is
//! safe to share between concurrent callers.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cardex::{CardexConfig, CatalogStore, RecordDraft};
//!
//! let store = CatalogStore::open(&CardexConfig::default())?;
//! let record = store.create(
//!     RecordDraft::new()
//!         .with_title("Margherita")
//!         .with_category("tradicional")
//!         .with_status("disponivel")
//!         .with_value(30.0),
//! )?;
//! assert_eq!(record.id.get(), 1);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

// Module declarations
pub mod api;
pub mod config;
pub mod models;
pub mod storage;
pub mod store;
pub mod validation;

// Re-exports for convenience
pub use config::CardexConfig;
pub use models::{ListFilter, Record, RecordDraft, RecordId};
pub use storage::SnapshotFile;
pub use store::CatalogStore;
pub use validation::{ValidationError, ValidationMode, Validator};

/// Error type for cardex operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Validation` | A payload fails a field check (missing field, short title, value out of range, field not in an allowed set) |
/// | `NotFound` | The referenced record id does not exist in the catalog |
/// | `CorruptStore` | The snapshot file exists but cannot be parsed |
/// | `Persistence` | The durable write could not complete, or a lock was poisoned |
#[derive(Debug, ThisError)]
pub enum Error {
    /// A payload failed validation.
    ///
    /// Always recoverable by the caller supplying corrected input; the
    /// inner reason is specific, never generic.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The referenced record does not exist.
    ///
    /// A normal outcome the caller must branch on, not an exceptional
    /// condition for the store.
    #[error("record {0} not found")]
    NotFound(RecordId),

    /// The snapshot file exists but is not well-formed.
    ///
    /// Surfaced distinctly from a missing file (which is a legitimate
    /// bootstrap state), since a parse failure indicates external
    /// interference or a prior incomplete write.
    #[error("snapshot '{path}' is corrupt: {cause}")]
    CorruptStore {
        /// Path of the unreadable snapshot.
        path: String,
        /// The underlying parse failure.
        cause: String,
    },

    /// A durable write or lock acquisition failed.
    ///
    /// The in-memory catalog is left at its pre-operation state; the last
    /// successfully written snapshot remains the source of truth.
    #[error("persistence operation '{operation}' failed: {cause}")]
    Persistence {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for cardex operations.
pub type Result<T> = std::result::Result<T, Error>;
