//! Typed record model for the board and planner collections.
//!
//! # Responsibility
//! - Define the two persisted record shapes (`Task`, `StudySession`).
//! - Enforce field invariants at construction time through drafts.
//!
//! # Invariants
//! - Every record carries a `RecordId` that never changes after creation.
//! - A record that fails `Record::validate` is never persisted.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod id;
pub mod session;
pub mod task;

pub use id::{IdGenerator, RecordId};

/// Field-level validation failure reported before any mutation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trimming.
    EmptyField(&'static str),
    /// Session duration must be at least one minute.
    NonPositiveDuration,
    /// A tag entry is empty after trimming.
    EmptyTag,
    /// A `done` session has no completion timestamp.
    MissingCompletedAt(RecordId),
    /// Enumerated field received an unknown value.
    UnknownValue { field: &'static str, value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} is required"),
            Self::NonPositiveDuration => write!(f, "duration must be a positive number of minutes"),
            Self::EmptyTag => write!(f, "tags must not be empty"),
            Self::MissingCompletedAt(id) => {
                write!(f, "session {id} is done but has no completion time")
            }
            Self::UnknownValue { field, value } => {
                write!(f, "unknown {field} `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Common contract for records stored in a mirrored collection.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Stable identity of this record.
    fn id(&self) -> RecordId;

    /// Returns the same record under a different identity.
    ///
    /// Only import paths re-key records; edits keep the original id.
    fn with_id(self, id: RecordId) -> Self;

    /// Checks field invariants of an already-built record.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}
