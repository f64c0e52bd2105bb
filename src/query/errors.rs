//! Query error types
//!
//! Error codes:
//! - CEREAL_FIELD_NOT_FOUND (REJECT)
//! - CEREAL_TYPE_MISMATCH (REJECT)
//! - CEREAL_UNSUPPORTED_OPERATOR (REJECT)

use thiserror::Error;

use crate::records::RecordKind;
use crate::store::StoreError;

/// Result type for filter and sort compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// Result type for query execution
pub type QueryResult<T> = Result<T, QueryError>;

/// Rejections raised while compiling a request context.
///
/// All of these are detected before the store is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Filter or sort key names a field the record type does not have
    #[error("Field '{field}' does not exist on {kind}")]
    FieldNotFound { kind: RecordKind, field: String },

    /// Literal cannot be parsed as the field's type
    #[error("Value '{value}' is not a valid {expected} for field '{field}'")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    /// Unknown operator tag, or an operator the field type cannot support
    #[error("Operator '{operator}' is not supported for field '{field}'")]
    UnsupportedOperator { field: String, operator: String },
}

impl CompileError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::FieldNotFound { .. } => "CEREAL_FIELD_NOT_FOUND",
            CompileError::TypeMismatch { .. } => "CEREAL_TYPE_MISMATCH",
            CompileError::UnsupportedOperator { .. } => "CEREAL_UNSUPPORTED_OPERATOR",
        }
    }
}

/// Errors raised by the query executor
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl QueryError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::Compile(err) => err.code(),
            QueryError::Store(err) => err.code(),
        }
    }
}
