//! API router configuration.

use std::path::PathBuf;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{download, execute, health, upload, AppState};
use super::stream::execute_stream;

/// Create the API router rooted at the given sandbox directory.
pub fn create_router(sandbox_root: impl Into<PathBuf>) -> Router {
    create_router_with_state(AppState::new(sandbox_root))
}

/// Create the API router with custom state.
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/execute", post(execute))
        .route("/execute/stream", post(execute_stream))
        .route("/upload", post(upload))
        .route("/download/{*path}", get(download))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Start the API server.
pub async fn serve(addr: std::net::SocketAddr, state: AppState) -> crate::Result<()> {
    let router = create_router_with_state(state);

    tracing::info!("Starting sandbox-runtime API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(crate::error::SandboxError::Io)?;

    axum::serve(listener, router)
        .await
        .map_err(|e| crate::error::SandboxError::Io(std::io::Error::other(e.to_string())))?;

    Ok(())
}
