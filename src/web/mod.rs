//! Web layer module
//!
//! HTTP interface for the catalog service. Handlers stay thin: they validate
//! the request shape, delegate to [`CatalogService`] or the cache backend,
//! and map errors to status codes.

use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::services::CatalogService;

pub mod api;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: CatalogService,
    pub cache: Arc<dyn CacheStore>,
}

/// Build the full application router for the given state.
///
/// Public so tests can drive the real routes against injected fakes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health_check))
        .nest("/api/v1", api_v1_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route(
            "/catalog",
            get(api::list_catalog_items).post(api::create_catalog_item),
        )
        .route("/catalog/accept-by-title/:title", put(api::accept_item_by_title))
        .route(
            "/catalog/delete-by-title/:title",
            delete(api::delete_item_by_title),
        )
        .route("/catalog/:id", get(api::get_catalog_item))
        // Cache maintenance
        .route("/cache/clear", post(api::clear_cache))
        .route("/cache/clear-catalog", post(api::clear_catalog_cache))
        .route("/cache/stats", get(api::cache_stats))
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub async fn new(
        config: Config,
        catalog: CatalogService,
        cache: Arc<dyn CacheStore>,
    ) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let app = build_router(AppState {
            config,
            catalog,
            cache,
        });
        Ok(Self { app, addr })
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }
}
