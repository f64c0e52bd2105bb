//! Record HTTP Routes
//!
//! Every route under `/api/:kind` dispatches on the record kind in the path
//! (`product`, `cereal` or `image`, any case) to the generic query and
//! mutation engines.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mutation::{IdBatch, MutationEngine, PatchBatch};
use crate::query::{QueryExecutor, RequestContext};
use crate::records::{Cereal, Product, ProductImage, Record, RecordKind};
use crate::registry;
use crate::store::{Catalog, RecordStore};

use super::errors::{ApiError, ApiResult};

// ==================
// Shared State
// ==================

/// Catalog shared across handlers
pub type SharedCatalog = Arc<Catalog>;

// ==================
// Request/Response Types
// ==================

/// Query string of `GET /api/:kind/get`
#[derive(Debug, Default, Deserialize)]
pub struct GetParams {
    /// URL-encoded JSON request context
    #[serde(default)]
    pub request: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

// ==================
// Routes
// ==================

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

/// Create record routes, nested under `/api`
pub fn record_routes(catalog: SharedCatalog) -> Router {
    Router::new()
        .route("/:kind/fields", get(fields_handler))
        .route("/:kind/get", get(get_handler))
        .route("/:kind/getall", get(get_all_handler))
        .route("/:kind/search", post(search_handler))
        .route("/:kind/:id/images", get(images_handler))
        .route("/:kind/create", post(create_handler))
        .route(
            "/:kind/update",
            post(legacy_update_handler).patch(update_handler),
        )
        .route("/:kind/delete", post(delete_handler))
        .with_state(catalog)
}

// ==================
// Helper Functions
// ==================

/// Calls a function generic over the record type with the type matching `kind`
macro_rules! dispatch {
    ($kind:expr, $func:ident($($arg:expr),* $(,)?)) => {
        match $kind {
            RecordKind::Product => $func::<Product>($($arg),*),
            RecordKind::Cereal => $func::<Cereal>($($arg),*),
            RecordKind::Image => $func::<ProductImage>($($arg),*),
        }
    };
}

fn parse_kind(raw: &str) -> ApiResult<RecordKind> {
    Ok(raw.parse()?)
}

fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| ApiError::InvalidRequest(format!("invalid id '{raw}': {e}")))
}

/// Decodes a JSON body; an empty body decodes as `T::default()`
fn decode_or_default<T: DeserializeOwned + Default>(body: &[u8]) -> ApiResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    Ok(serde_json::from_slice(body)?)
}

fn run_query<R: Record>(
    catalog: &Catalog,
    ctx: &RequestContext,
    id: Option<Uuid>,
) -> ApiResult<Response>
where
    Catalog: RecordStore<R>,
{
    let rows = QueryExecutor::<R, Catalog>::new(catalog).query(ctx, id)?;
    Ok(Json(rows).into_response())
}

fn list_all<R: Record>(catalog: &Catalog) -> ApiResult<Response>
where
    Catalog: RecordStore<R>,
{
    let rows = QueryExecutor::<R, Catalog>::new(catalog).all()?;
    Ok(Json(rows).into_response())
}

fn create_records<R: Record>(catalog: &Catalog, body: &[u8]) -> ApiResult<Response>
where
    Catalog: RecordStore<R>,
{
    let batch: PatchBatch<R::Patch> = decode(body)?;
    let outcome = MutationEngine::<R, Catalog>::new(catalog).create(batch.entries())?;
    Ok(Json(outcome).into_response())
}

fn update_records<R: Record>(catalog: &Catalog, body: &[u8]) -> ApiResult<Response>
where
    Catalog: RecordStore<R>,
{
    let batch: PatchBatch<R::Patch> = decode(body)?;
    let outcome = MutationEngine::<R, Catalog>::new(catalog).update(batch.entries())?;
    Ok(Json(outcome).into_response())
}

fn apply_mixed_batch<R: Record>(catalog: &Catalog, body: &[u8]) -> ApiResult<Response>
where
    Catalog: RecordStore<R>,
{
    let batch: PatchBatch<R::Patch> = decode(body)?;
    let outcome = MutationEngine::<R, Catalog>::new(catalog).apply_mixed(batch)?;
    Ok(Json(outcome).into_response())
}

fn delete_records<R: Record>(catalog: &Catalog, ids: &IdBatch) -> ApiResult<Response>
where
    Catalog: RecordStore<R>,
{
    let outcome = MutationEngine::<R, Catalog>::new(catalog).delete(ids.ids())?;
    Ok(Json(outcome).into_response())
}

// ==================
// Handlers
// ==================

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn fields_handler(Path(kind): Path<String>) -> ApiResult<Response> {
    let kind = parse_kind(&kind)?;
    Ok(Json(registry::describe(kind)).into_response())
}

async fn get_handler(
    State(catalog): State<SharedCatalog>,
    Path(kind): Path<String>,
    Query(params): Query<GetParams>,
) -> ApiResult<Response> {
    let kind = parse_kind(&kind)?;
    let ctx: RequestContext = match params.request.as_deref() {
        Some(raw) => decode_or_default(raw.as_bytes())?,
        None => RequestContext::default(),
    };
    let id = match params.id.as_deref() {
        Some(raw) if !raw.trim().is_empty() => Some(parse_id(raw)?),
        _ => None,
    };
    dispatch!(kind, run_query(&catalog, &ctx, id))
}

async fn get_all_handler(
    State(catalog): State<SharedCatalog>,
    Path(kind): Path<String>,
) -> ApiResult<Response> {
    let kind = parse_kind(&kind)?;
    dispatch!(kind, list_all(&catalog))
}

async fn search_handler(
    State(catalog): State<SharedCatalog>,
    Path(kind): Path<String>,
    body: Bytes,
) -> ApiResult<Response> {
    let kind = parse_kind(&kind)?;
    let ctx: RequestContext = decode_or_default(&body)?;
    dispatch!(kind, run_query(&catalog, &ctx, None))
}

/// Images attached to one product
async fn images_handler(
    State(catalog): State<SharedCatalog>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<Response> {
    if parse_kind(&kind)? != RecordKind::Product {
        return Err(ApiError::NotFound(format!("/api/{kind}/{id}/images")));
    }
    let id = parse_id(&id)?;
    let ctx = RequestContext::new().filter("productReference", "eq", id.to_string());
    run_query::<ProductImage>(&catalog, &ctx, None)
}

async fn create_handler(
    State(catalog): State<SharedCatalog>,
    Path(kind): Path<String>,
    body: Bytes,
) -> ApiResult<Response> {
    let kind = parse_kind(&kind)?;
    dispatch!(kind, create_records(&catalog, &body))
}

async fn update_handler(
    State(catalog): State<SharedCatalog>,
    Path(kind): Path<String>,
    body: Bytes,
) -> ApiResult<Response> {
    let kind = parse_kind(&kind)?;
    dispatch!(kind, update_records(&catalog, &body))
}

/// Mixed delete/update/create batch
async fn legacy_update_handler(
    State(catalog): State<SharedCatalog>,
    Path(kind): Path<String>,
    body: Bytes,
) -> ApiResult<Response> {
    let kind = parse_kind(&kind)?;
    dispatch!(kind, apply_mixed_batch(&catalog, &body))
}

async fn delete_handler(
    State(catalog): State<SharedCatalog>,
    Path(kind): Path<String>,
    body: Bytes,
) -> ApiResult<Response> {
    let kind = parse_kind(&kind)?;
    let ids: IdBatch = decode(&body)?;
    dispatch!(kind, delete_records(&catalog, &ids))
}
