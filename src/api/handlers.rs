//! REST API handlers.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path as UrlPath, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{error, info};

use super::types::{ExecuteRequest, HealthResponse, MessageResponse};
use crate::error::SandboxError;
use crate::execution::{ExecutionResult, Executor};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<Executor>,
}

impl AppState {
    /// Create state with an executor rooted at the given sandbox directory.
    pub fn new(sandbox_root: impl Into<PathBuf>) -> Self {
        Self {
            executor: Arc::new(Executor::new(sandbox_root)),
        }
    }

    fn sandbox_root(&self) -> &Path {
        self.executor.sandbox_root()
    }
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Execute a command and return its captured output.
///
/// Always answers 200 with an [`ExecutionResult`]; failures are encoded
/// in the exit code, never as an HTTP error.
pub async fn execute(
    State(state): State<AppState>,
    Json(req): Json<ExecuteRequest>,
) -> Json<ExecutionResult> {
    info!(command = %req.command, timeout = ?req.timeout, "execute");
    Json(state.executor.run(&req.spec()).await)
}

/// Upload a file into the sandbox root.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MessageResponse>, (StatusCode, Json<MessageResponse>)> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new(format!("Invalid multipart body: {e}"))),
        )
    })? {
        let Some(name) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let path = resolve_path(state.sandbox_root(), &name).map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse::new(e.to_string())),
            )
        })?;

        let data = field.bytes().await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse::new(format!("Failed to read upload: {e}"))),
            )
        })?;

        tokio::fs::write(&path, &data).await.map_err(|e| {
            error!(file = %name, error = %e, "file upload failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new(format!("File upload failed: {e}"))),
            )
        })?;

        info!(file = %name, bytes = data.len(), "file uploaded");
        return Ok(Json(MessageResponse::new(format!(
            "File '{name}' uploaded successfully."
        ))));
    }

    Err((
        StatusCode::BAD_REQUEST,
        Json(MessageResponse::new("No file field in request")),
    ))
}

/// Download a file from the sandbox root.
pub async fn download(
    State(state): State<AppState>,
    UrlPath(file_path): UrlPath<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<MessageResponse>)> {
    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Json(MessageResponse::new("File not found")),
        )
    };

    let path = resolve_path(state.sandbox_root(), &file_path).map_err(|_| not_found())?;

    let data = tokio::fs::read(&path).await.map_err(|_| not_found())?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "download".to_string());

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/octet-stream".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        data,
    ))
}

/// Join a client-supplied relative path onto the sandbox root.
///
/// Absolute paths and any `..` component are rejected so requests cannot
/// reach outside the root.
fn resolve_path(root: &Path, relative: &str) -> Result<PathBuf, SandboxError> {
    let relative = Path::new(relative);

    let escapes = relative.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes || relative.as_os_str().is_empty() {
        return Err(SandboxError::InvalidPath(
            relative.to_string_lossy().into_owned(),
        ));
    }

    Ok(root.join(relative))
}
