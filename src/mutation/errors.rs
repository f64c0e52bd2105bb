//! Mutation error types
//!
//! Error codes:
//! - CEREAL_EMPTY_BATCH (REJECT)
//! - CEREAL_UNKNOWN_FIELD / CEREAL_READ_ONLY_FIELD /
//!   CEREAL_ASSIGNMENT_TYPE_MISMATCH (REJECT, from the registry)
//! - CEREAL_PERSISTENCE_FAILED / CEREAL_STORE_UNAVAILABLE (ERROR, from the store)
//!
//! Unknown identifiers on update or delete are not errors; they are left
//! out of the affected-row count.

use thiserror::Error;

use crate::registry::RegistryError;
use crate::store::StoreError;

/// Result type for mutation operations
pub type MutationResult<T> = Result<T, MutationError>;

#[derive(Debug, Error)]
pub enum MutationError {
    /// Batch had no entries
    #[error("No items provided.")]
    EmptyBatch,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MutationError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            MutationError::EmptyBatch => "CEREAL_EMPTY_BATCH",
            MutationError::Registry(err) => err.code(),
            MutationError::Store(err) => err.code(),
        }
    }
}
