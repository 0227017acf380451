//! Whole-catalog snapshot codec.
//!
//! The catalog is persisted as a single JSON array of records, rewritten in
//! full on every mutation. There is no append or incremental mode: the file
//! always reflects the last successfully completed mutation.
//!
//! Writes go to a sibling temp file which is fsynced and then renamed over
//! the canonical path, so a reader never observes a half-written file and a
//! crash mid-write leaves the previous snapshot intact.

use crate::models::Record;
use crate::{Error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Codec for the on-disk catalog snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    /// Canonical snapshot path.
    path: PathBuf,
}

impl SnapshotFile {
    /// Creates a codec for the given snapshot path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the snapshot path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full catalog from disk.
    ///
    /// A missing file is the bootstrap state and yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStore`] if the file exists but cannot be
    /// parsed, and [`Error::Persistence`] if it cannot be read at all. A
    /// corrupt snapshot is never silently replaced by an empty catalog.
    pub fn load(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no snapshot, starting empty");
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| Error::Persistence {
            operation: "read_snapshot".to_string(),
            cause: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| Error::CorruptStore {
            path: self.path.display().to_string(),
            cause: e.to_string(),
        })
    }

    /// Writes the full catalog to disk atomically.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if serialization, the temp-file
    /// write, or the final rename fails. On failure the previous snapshot
    /// is left untouched.
    pub fn save(&self, records: &[Record]) -> Result<()> {
        let json = serde_json::to_string_pretty(records).map_err(|e| Error::Persistence {
            operation: "serialize_catalog".to_string(),
            cause: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::Persistence {
                    operation: "create_snapshot_dir".to_string(),
                    cause: e.to_string(),
                })?;
            }
        }

        // Stage in a sibling file so the rename stays on one filesystem.
        let tmp_path = self.tmp_path();
        let result = Self::write_and_sync(&tmp_path, json.as_bytes())
            .and_then(|()| {
                fs::rename(&tmp_path, &self.path).map_err(|e| Error::Persistence {
                    operation: "replace_snapshot".to_string(),
                    cause: e.to_string(),
                })
            });

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<()> {
        let mut file = File::create(path).map_err(|e| Error::Persistence {
            operation: "create_snapshot_tmp".to_string(),
            cause: e.to_string(),
        })?;
        file.write_all(bytes).map_err(|e| Error::Persistence {
            operation: "write_snapshot".to_string(),
            cause: e.to_string(),
        })?;
        file.sync_all().map_err(|e| Error::Persistence {
            operation: "sync_snapshot".to_string(),
            cause: e.to_string(),
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map_or_else(
            || std::ffi::OsString::from("snapshot"),
            std::ffi::OsStr::to_os_string,
        );
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
