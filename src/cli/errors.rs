//! CLI-specific error types
//!
//! All CLI errors are fatal: they are printed to stderr and the process
//! exits with status 1.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::query::QueryError;
use crate::records::UnknownKind;
use crate::store::StoreError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),

    /// Argument that clap accepted but the command cannot use
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Runtime or server failure after boot
    #[error("Server failed: {0}")]
    Server(String),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(err) => err.code(),
            CliError::Store(err) => err.code(),
            CliError::Query(err) => err.code(),
            CliError::UnknownKind(_) => "CEREAL_UNKNOWN_KIND",
            CliError::InvalidArgument(_) => "CEREAL_CLI_INVALID_ARGUMENT",
            CliError::Io(_) => "CEREAL_CLI_IO_ERROR",
            CliError::Json(_) => "CEREAL_CLI_JSON_ERROR",
            CliError::Server(_) => "CEREAL_CLI_SERVER_FAILED",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
