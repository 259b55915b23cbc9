//! HTTP API layer.
//!
//! A thin axum surface over the execution engine, plus simple file
//! transfer in and out of the sandbox root:
//!
//! - `GET /`, `GET /health` — health check
//! - `POST /execute` — run a command, return captured output
//! - `POST /execute/stream` — run a command, stream output over SSE
//! - `POST /upload` — save a multipart file under the sandbox root
//! - `GET /download/{path}` — fetch a file from under the sandbox root
//!
//! The layer only branches on exit codes and event types; the execution
//! core never surfaces an error past its boundary.

mod handlers;
mod router;
mod stream;
mod types;

pub use handlers::AppState;
pub use router::{create_router, create_router_with_state, serve};
pub use types::{ExecuteRequest, HealthResponse, MessageResponse};
