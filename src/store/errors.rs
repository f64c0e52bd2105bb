//! Store error types
//!
//! Error codes:
//! - CEREAL_PERSISTENCE_FAILED (ERROR)
//! - CEREAL_STORE_UNAVAILABLE (ERROR)
//! - CEREAL_SEED_INVALID (FATAL at boot)

use thiserror::Error;
use uuid::Uuid;

use crate::records::RecordKind;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A staged record violates a table constraint
    #[error("{kind} {id} rejected: {reason}")]
    ConstraintViolation {
        kind: RecordKind,
        id: Uuid,
        reason: String,
    },

    /// Commit would grow the table past its configured capacity
    #[error("{kind} table is full: {rows} rows exceeds the limit of {limit}")]
    CapacityExceeded {
        kind: RecordKind,
        rows: usize,
        limit: usize,
    },

    /// Two staged records share an identifier
    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: RecordKind, id: Uuid },

    /// Table lock poisoned by a panicked writer
    #[error("{kind} table is unavailable")]
    Unavailable { kind: RecordKind },

    /// Seed file could not be read or parsed
    #[error("Failed to load seed file {path}: {reason}")]
    Seed { path: String, reason: String },
}

impl StoreError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::ConstraintViolation { .. }
            | StoreError::CapacityExceeded { .. }
            | StoreError::DuplicateId { .. } => "CEREAL_PERSISTENCE_FAILED",
            StoreError::Unavailable { .. } => "CEREAL_STORE_UNAVAILABLE",
            StoreError::Seed { .. } => "CEREAL_SEED_INVALID",
        }
    }
}
