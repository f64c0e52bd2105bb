//! # HTTP Server Module
//!
//! Thin axum layer over the query and mutation engines.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/:kind/fields` - Field descriptors
//! - `GET /api/:kind/get?request=<json>&id=<uuid>` - Query or point lookup
//! - `GET /api/:kind/getall` - Every record in storage order
//! - `POST /api/:kind/search` - Query with a request context body
//! - `GET /api/product/:id/images` - Images attached to a product
//! - `POST /api/:kind/create` - Create batch
//! - `PATCH /api/:kind/update` - Partial update batch
//! - `POST /api/:kind/update` - Mixed delete/update/create batch
//! - `POST /api/:kind/delete` - Delete by identifiers

pub mod config;
pub mod errors;
pub mod routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use routes::SharedCatalog;
pub use server::HttpServer;
