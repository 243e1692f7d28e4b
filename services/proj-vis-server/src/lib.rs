//! Transform service library.
//!
//! Serves the batch, single-coordinate and validation-probe requests the
//! projector's remote provider sends, plus a health check.

pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tokio::net::TcpListener;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub use state::{AppState, ServerConfig};

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::transform::transform_handler))
        .route("/health", get(handlers::health::health_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

/// Serve requests on `listener` until the server fails.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}
