//! Record types and identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a record.
///
/// Ids are positive integers allocated by the store and immutable once
/// assigned. They are never reused after a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Creates a record ID from a raw integer.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A stored catalog record.
///
/// This is the persisted shape: every field is present and already
/// validated. Candidate input arrives as a [`RecordDraft`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier, assigned by the store at creation.
    pub id: RecordId,
    /// Display title, trimmed length >= 3.
    pub title: String,
    /// Category, drawn from the configured allowed set.
    pub category: String,
    /// Status, drawn from the configured allowed set.
    pub status: String,
    /// Free-form description, empty when not provided.
    #[serde(default)]
    pub description: String,
    /// Monetary value, never negative.
    pub value: f64,
}

/// Candidate payload for create and replace operations.
///
/// Every field is optional so that absence is observable: the validator
/// turns a missing required field into a named failure instead of a
/// runtime type error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    /// Proposed title.
    pub title: Option<String>,
    /// Proposed category.
    pub category: Option<String>,
    /// Proposed status.
    pub status: Option<String>,
    /// Proposed description.
    pub description: Option<String>,
    /// Proposed monetary value.
    pub value: Option<f64>,
}

impl RecordDraft {
    /// Creates an empty draft.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            category: None,
            status: None,
            description: None,
            value: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the monetary value.
    #[must_use]
    pub const fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}
