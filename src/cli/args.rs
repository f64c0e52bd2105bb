//! CLI argument definitions using clap
//!
//! Commands:
//! - cereal-api serve [--config <path>] [--port <port>]
//! - cereal-api query [--config <path>] --kind <kind> [--request <json>] [--id <uuid>]
//! - cereal-api fields --kind <kind>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cereal-api - Generic search and batched mutations over catalog records
#[derive(Parser, Debug)]
#[command(name = "cereal-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (default: ./cereal-api.json if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one query over the seeded catalog and print the result
    Query {
        /// Path to configuration file (default: ./cereal-api.json if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Record kind: product, cereal or image
        #[arg(long)]
        kind: String,

        /// Request context as JSON: {"filters": [...], "sortOrders": [...]}
        #[arg(long)]
        request: Option<String>,

        /// Point lookup by identifier; overrides --request
        #[arg(long)]
        id: Option<String>,
    },

    /// Print the field descriptors of a record kind
    Fields {
        /// Record kind: product, cereal or image
        #[arg(long)]
        kind: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
