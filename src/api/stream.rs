//! Server-sent events handler for streamed execution.
//!
//! Wire format, one SSE message per [`OutputEvent`]:
//!
//! ```text
//! event: stdout, data: <line>
//! event: stderr, data: <line>
//! event: error,  data: <message>
//! event: done,   data: {"exit_code": <code>}
//! ```
//!
//! The stream always ends with exactly one `done` message.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures_util::stream::{self, Stream};
use tracing::info;

use super::handlers::AppState;
use super::types::ExecuteRequest;
use crate::execution::OutputEvent;

/// Execute a command and stream its output as server-sent events.
pub async fn execute_stream(
    State(state): State<AppState>,
    Json(req): Json<ExecuteRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!(command = %req.command, timeout = ?req.timeout, "execute (streaming)");

    let rx = state.executor.run_stream(&req.spec());

    // The receiver closes after the terminal event, ending the stream.
    let stream = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|event| (Ok(sse_event(event)), rx))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Map an execution event to its SSE representation.
fn sse_event(event: OutputEvent) -> Event {
    let kind = event.kind();
    match event {
        OutputEvent::Stdout(line) | OutputEvent::Stderr(line) | OutputEvent::Error(line) => {
            Event::default().event(kind).data(line)
        }
        OutputEvent::Done { exit_code } => Event::default()
            .event(kind)
            .data(serde_json::json!({ "exit_code": exit_code }).to_string()),
    }
}
