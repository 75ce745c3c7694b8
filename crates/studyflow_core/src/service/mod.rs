//! Mutation use-cases over mirrored collections.
//!
//! # Responsibility
//! - Validate input, apply one mutation, persist, and expose projections.
//! - Keep callers decoupled from mirror and store details.
//!
//! # Invariants
//! - Every mutation is all-or-nothing: on error the mirror is unchanged.
//! - Operations addressing a missing id change nothing and report
//!   `MutationOutcome::NotFound`.
//! - Mutation entry points take `&mut self`, so one submit is in flight at a
//!   time per service, enrichment included.

use crate::model::{Record, RecordId, ValidationError};
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod board_service;
pub mod planner_service;

/// Result of a mutation that addresses an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// No record with the given id; the collection was left untouched.
    NotFound,
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }

    fn status(self) -> &'static str {
        match self {
            Self::Applied => "ok",
            Self::NotFound => "noop",
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected before any mutation.
    Validation(ValidationError),
    /// Write to the backing store failed; the mirror was not changed.
    Store(StoreError),
    /// Import payload rejected; the collection was not changed.
    Import(String),
    /// Collection could not be rendered for export.
    Export(serde_json::Error),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "failed to save changes: {err}"),
            Self::Import(message) => write!(f, "invalid import file: {message}"),
            Self::Export(err) => write!(f, "failed to export sessions: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Import(_) => None,
            Self::Export(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Copies `records`, replacing the one matching `id` with `revise(record)`.
///
/// Returns `None` when no record matches.
fn replace_record<T: Record>(
    records: &[T],
    id: RecordId,
    revise: impl FnOnce(&T) -> T,
) -> Option<Vec<T>> {
    let position = records.iter().position(|record| record.id() == id)?;
    let mut next = records.to_vec();
    next[position] = revise(&records[position]);
    Some(next)
}

/// Copies `records` without the one matching `id`.
fn remove_record<T: Record>(records: &[T], id: RecordId) -> Option<Vec<T>> {
    let position = records.iter().position(|record| record.id() == id)?;
    let mut next = records.to_vec();
    next.remove(position);
    Some(next)
}
