//! API server builder and router

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::registry::Registry;
use crate::state::AppState;
use crate::uploads::UploadStore;

/// Default cap on request bodies, sized for photo uploads
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Inventory builder for configuring and creating the HTTP service
#[derive(Debug)]
pub struct InventoryBuilder {
    uploads: UploadStore,
    registry: Option<Registry>,
    body_limit: usize,
}

impl InventoryBuilder {
    /// Create a new builder storing photos in `uploads`
    pub fn new(uploads: UploadStore) -> Self {
        Self {
            uploads,
            registry: None,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Serve an existing registry instead of a fresh, empty one
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the maximum request body size in bytes
    pub fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Build the inventory service
    ///
    /// Returns a Router that can be served with any tower-compatible server
    pub fn build(self) -> Router {
        let state = AppState {
            registry: self.registry.unwrap_or_default(),
            uploads: self.uploads,
        };

        Router::new()
            .merge(crate::inventory::router())
            .merge(crate::photo::router())
            .merge(crate::search::router())
            .fallback(not_found)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(from_fn(crate::allow::method_filter))
                    .layer(DefaultBodyLimit::max(self.body_limit)),
            )
            .with_state(state)
    }
}

/// Anything unrouted
async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
