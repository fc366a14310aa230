//! Media delivery server.
//!
//! Wires the collaborator stores into an axum router. Every connection is
//! its own tokio task; the shared stores are read-only behind `Arc`, so
//! requests never contend on locks.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::Router;
use axum::routing::get;
use lectern_core::catalog::CatalogStore;
use lectern_core::config::ServerConfig;
use lectern_core::entitlement::EntitlementStore;
use lectern_core::storage::BlobStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::AuthProvider;
use crate::handlers::{download_resource, health, stream_video};

/// Shared collaborators for request handling.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthProvider>,
    pub catalog: Arc<dyn CatalogStore>,
    pub entitlements: Arc<dyn EntitlementStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub stats: Arc<ServeStats>,
}

/// Delivery counters exposed on `/health`.
#[derive(Debug)]
pub struct ServeStats {
    started_at: Instant,
    requests_served: AtomicU64,
    bytes_streamed: AtomicU64,
}

impl ServeStats {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            requests_served: AtomicU64::new(0),
            bytes_streamed: AtomicU64::new(0),
        }
    }

    pub fn record_request(&self) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_streamed(&self, bytes: u64) {
        self.bytes_streamed.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }

    pub fn bytes_streamed(&self) -> u64 {
        self.bytes_streamed.load(Ordering::Relaxed)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl Default for ServeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the media router over the given collaborators.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/media/video/{filename}", get(stream_video))
        .route("/media/file/{filename}", get(download_resource))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the listen address and serves until the process exits.
///
/// # Errors
///
/// - `std::io::Error` - Binding or serving the listener failed
pub async fn run_server(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = TcpListener::bind(config.listen).await?;
    info!("lectern media server listening on http://{}", config.listen);
    axum::serve(listener, app).await
}
