//! Payload validation.
//!
//! The validator is a pure checker: it inspects a [`RecordDraft`] against
//! the configured allowed sets and length/sign constraints and reports a
//! specific failure, never a generic one. It has no side effects and never
//! touches the catalog.

use crate::config::CardexConfig;
use crate::models::RecordDraft;
use thiserror::Error as ThisError;

/// Minimum trimmed title length, in characters.
pub const MIN_TITLE_CHARS: usize = 3;

/// A specific validation failure.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    /// A required field was absent from the payload.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// The title has fewer than [`MIN_TITLE_CHARS`] characters after trimming.
    #[error("title must have at least {MIN_TITLE_CHARS} characters")]
    TitleTooShort,

    /// The category is not in the configured allowed set.
    #[error("category '{0}' is not allowed")]
    UnknownCategory(String),

    /// The status is not in the configured allowed set.
    #[error("status '{0}' is not allowed")]
    UnknownStatus(String),

    /// The value is negative.
    #[error("value must not be negative")]
    NegativeValue,

    /// The value is zero or negative where a positive value is required.
    #[error("value must be greater than zero")]
    NonPositiveValue,
}

/// Which fields a payload must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Full payload for a new record; value constraints apply.
    Create,
    /// Full payload overwriting an existing record.
    Replace,
    /// Only the status field is examined; everything else is ignored.
    StatusPatch,
}

/// Pure payload checker, parameterized by the configured allowed sets.
#[derive(Debug, Clone)]
pub struct Validator {
    categories: Vec<String>,
    statuses: Vec<String>,
    require_value_on_create: bool,
}

impl Validator {
    /// Creates a validator from configuration.
    #[must_use]
    pub fn from_config(config: &CardexConfig) -> Self {
        Self {
            categories: config.categories.clone(),
            statuses: config.statuses.clone(),
            require_value_on_create: config.require_value_on_create,
        }
    }

    /// Checks a draft against the given mode.
    ///
    /// # Errors
    ///
    /// Returns the first specific failure found: missing field, short
    /// title, unknown category or status, or a value out of range.
    pub fn check(
        &self,
        draft: &RecordDraft,
        mode: ValidationMode,
    ) -> std::result::Result<(), ValidationError> {
        // Status is required in every mode.
        let status = draft
            .status
            .as_deref()
            .ok_or(ValidationError::MissingField("status"))?;
        if !self.statuses.iter().any(|s| s == status) {
            return Err(ValidationError::UnknownStatus(status.to_string()));
        }

        if mode == ValidationMode::StatusPatch {
            return Ok(());
        }

        let title = draft
            .title
            .as_deref()
            .ok_or(ValidationError::MissingField("title"))?;
        if title.trim().chars().count() < MIN_TITLE_CHARS {
            return Err(ValidationError::TitleTooShort);
        }

        let category = draft
            .category
            .as_deref()
            .ok_or(ValidationError::MissingField("category"))?;
        if !self.categories.iter().any(|c| c == category) {
            return Err(ValidationError::UnknownCategory(category.to_string()));
        }

        if let Some(value) = draft.value {
            if value < 0.0 {
                return Err(ValidationError::NegativeValue);
            }
        }

        if mode == ValidationMode::Create && self.require_value_on_create {
            let value = draft.value.ok_or(ValidationError::MissingField("value"))?;
            if value <= 0.0 {
                return Err(ValidationError::NonPositiveValue);
            }
        }

        Ok(())
    }
}
