//! CLI command implementations
//!
//! Boot sequence shared by `serve` and `query`:
//! 1. Resolve and validate configuration
//! 2. Install the log subscriber
//! 3. Open the catalog, loading the seed file if configured

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::query::{QueryExecutor, RequestContext};
use crate::records::{Cereal, Product, ProductImage, Record, RecordKind};
use crate::registry;
use crate::store::{Catalog, RecordStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Parses process arguments and runs the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Query {
            config,
            kind,
            request,
            id,
        } => query(config.as_deref(), &kind, request.as_deref(), id.as_deref()),
        Command::Fields { kind } => fields(&kind),
    }
}

/// Boot the service and serve HTTP until the process is stopped
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = ServiceConfig::resolve(config_path)?;
    match port {
        Some(0) => return Err(CliError::InvalidArgument("--port must be > 0".to_string())),
        Some(port) => config.server.port = port,
        None => {}
    }

    init_logging(&config.log_filter);
    let catalog = open_catalog(&config)?;
    let server = HttpServer::with_config(config.server.clone(), Arc::new(catalog));
    info!(target: "cereal::http", addr = %server.config().bind_target(), "Starting server");

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Server(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::Server(format!("HTTP server failed: {}", e)))
    })
}

/// Execute a single query against the seeded catalog and print the rows
pub fn query(
    config_path: Option<&Path>,
    kind: &str,
    request: Option<&str>,
    id: Option<&str>,
) -> CliResult<()> {
    let config = ServiceConfig::resolve(config_path)?;
    init_logging(&config.log_filter);

    let kind: RecordKind = kind.parse()?;
    let ctx: RequestContext = match request {
        Some(raw) => serde_json::from_str(raw)?,
        None => RequestContext::default(),
    };
    let id = id
        .map(|raw| {
            Uuid::parse_str(raw.trim())
                .map_err(|e| CliError::InvalidArgument(format!("--id '{raw}': {e}")))
        })
        .transpose()?;

    let catalog = open_catalog(&config)?;
    let rows = query_catalog(&catalog, kind, &ctx, id)?;
    write_json(&rows)
}

/// Print the field descriptors of a record kind
pub fn fields(kind: &str) -> CliResult<()> {
    let kind: RecordKind = kind.parse()?;
    write_json(&registry::describe(kind))
}

/// Runs a query for the given kind and returns the rows as JSON
pub fn query_catalog(
    catalog: &Catalog,
    kind: RecordKind,
    ctx: &RequestContext,
    id: Option<Uuid>,
) -> CliResult<Value> {
    match kind {
        RecordKind::Product => rows_as_json::<Product>(catalog, ctx, id),
        RecordKind::Cereal => rows_as_json::<Cereal>(catalog, ctx, id),
        RecordKind::Image => rows_as_json::<ProductImage>(catalog, ctx, id),
    }
}

fn rows_as_json<R: Record>(
    catalog: &Catalog,
    ctx: &RequestContext,
    id: Option<Uuid>,
) -> CliResult<Value>
where
    Catalog: RecordStore<R>,
{
    let rows = QueryExecutor::<R, Catalog>::new(catalog).query(ctx, id)?;
    Ok(serde_json::to_value(rows)?)
}

fn open_catalog(config: &ServiceConfig) -> CliResult<Catalog> {
    Ok(Catalog::open(
        config.store.seed_file.as_deref(),
        config.store.max_rows_per_table,
    )?)
}
