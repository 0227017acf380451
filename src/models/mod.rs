//! Data models for cardex.
//!
//! This module contains the core data structures used throughout the system.

mod filter;
mod record;

pub use filter::ListFilter;
pub use record::{Record, RecordDraft, RecordId};
