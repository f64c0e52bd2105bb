//! Registry error types

use thiserror::Error;

use crate::records::RecordKind;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised while writing fields through the registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Assignment names a field the record type does not register
    #[error("Field '{field}' is not registered for {kind}")]
    UnknownField { kind: RecordKind, field: String },

    /// Assignment targets the identifier
    #[error("Field '{field}' is read-only")]
    ReadOnly { field: &'static str },

    /// Assignment value does not fit the field type
    #[error("Field '{field}' expects {expected}, got {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl RegistryError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::UnknownField { .. } => "CEREAL_UNKNOWN_FIELD",
            RegistryError::ReadOnly { .. } => "CEREAL_READ_ONLY_FIELD",
            RegistryError::TypeMismatch { .. } => "CEREAL_ASSIGNMENT_TYPE_MISMATCH",
        }
    }
}
