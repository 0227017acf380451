//! List filters.

use super::Record;

/// Filter criteria for listing records.
///
/// Predicates are combined with AND logic; an empty filter matches every
/// record. Filtering never changes catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Exact status match.
    pub status: Option<String>,
    /// Case-insensitive title substring match.
    pub title_contains: Option<String>,
}

impl ListFilter {
    /// Creates an empty filter (matches all).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            category: None,
            status: None,
            title_contains: None,
        }
    }

    /// Adds a category predicate.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Adds a status predicate.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Adds a title substring predicate.
    #[must_use]
    pub fn with_title_contains(mut self, needle: impl Into<String>) -> Self {
        self.title_contains = Some(needle.into());
        self
    }

    /// Returns true if the filter is empty (matches all).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none() && self.status.is_none() && self.title_contains.is_none()
    }

    /// Returns true if the record satisfies every configured predicate.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(ref category) = self.category {
            if record.category != *category {
                return false;
            }
        }
        if let Some(ref status) = self.status {
            if record.status != *status {
                return false;
            }
        }
        if let Some(ref needle) = self.title_contains {
            if !record
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}
