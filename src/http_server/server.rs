//! # HTTP Server
//!
//! Binds the health and record routers behind tracing, CORS and body-limit
//! layers.

use std::io;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::config::HttpServerConfig;
use super::routes::{health_routes, record_routes, SharedCatalog};
use crate::store::Catalog;

/// Record API server over one catalog
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Default settings over an empty catalog
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default(), Arc::new(Catalog::default()))
    }

    pub fn with_config(config: HttpServerConfig, catalog: SharedCatalog) -> Self {
        let router = Router::new()
            .merge(health_routes())
            .nest("/api", record_routes(catalog))
            .layer(DefaultBodyLimit::max(config.body_limit_bytes))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.cors_origins));
        Self { config, router }
    }

    pub fn config(&self) -> &HttpServerConfig {
        &self.config
    }

    /// Consumes the server, returning the router for in-process use
    pub fn router(self) -> Router {
        self.router
    }

    /// Opens the listener, resolving a host name if one is configured
    pub async fn bind(&self) -> io::Result<TcpListener> {
        let target = self.config.bind_target();
        TcpListener::bind(target.as_str()).await.map_err(|e| {
            io::Error::new(e.kind(), format!("cannot listen on {target}: {e}"))
        })
    }

    /// Binds the listener and serves until the process stops
    pub async fn start(self) -> io::Result<()> {
        let listener = self.bind().await?;
        let addr = listener.local_addr()?;
        info!(target: "cereal::http", %addr, "Serving record API");
        axum::serve(listener, self.router).await
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Allow-list CORS, or any origin when the list is empty
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<_> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(target: "cereal::http", %origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(parsed))
}
