//! CLI module for cereal-api
//!
//! Provides command-line interface for:
//! - serve: Boot the catalog and serve HTTP
//! - query: One-shot query over the seeded catalog
//! - fields: Print field descriptors

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{fields, query, query_catalog, run, run_command, serve};
pub use errors::{CliError, CliResult};
pub use io::{write_json, write_json_to};
