//! Execution result and streaming event types.

use serde::Serialize;

/// Exit code reported when a command is killed for exceeding its timeout.
///
/// Mirrors the conventional `timeout(1)` sentinel. Part of the external
/// contract; callers branch on it.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Exit code reported for any failure that is not a timeout: parse
/// errors, spawn errors, internal I/O faults. Part of the external
/// contract.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Final result of a synchronous execution.
///
/// Every failure mode is folded into this shape; the exit code is always
/// one of the child's real status, [`TIMEOUT_EXIT_CODE`], or
/// [`FAILURE_EXIT_CODE`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Captured stdout, lossily decoded as UTF-8.
    pub stdout: String,
    /// Captured stderr, lossily decoded as UTF-8.
    pub stderr: String,
    /// Exit code of the child, or a sentinel.
    pub exit_code: i32,
}

impl ExecutionResult {
    /// Result for a command that ran to completion.
    pub fn completed(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }

    /// Result for a command killed at its timeout.
    pub fn timed_out(secs: u64) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("Command timed out after {secs} seconds"),
            exit_code: TIMEOUT_EXIT_CODE,
        }
    }

    /// Result for a command that could not be executed at all.
    pub fn failed(message: impl std::fmt::Display) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("Failed to execute command: {message}"),
            exit_code: FAILURE_EXIT_CODE,
        }
    }

    /// Whether the command exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// One event in a streamed execution.
///
/// A stream is a finite sequence of these, ending with exactly one
/// `Done`, optionally preceded by one `Error`. Line events carry the text
/// with the trailing newline stripped. Per-channel ordering follows the
/// producer; stdout/stderr interleaving relative to each other is
/// best-effort.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum OutputEvent {
    /// A complete line from the child's stdout.
    Stdout(String),
    /// A complete line from the child's stderr.
    Stderr(String),
    /// Terminal event carrying the exit code (real or sentinel).
    Done {
        /// Exit code of the child, or a sentinel.
        exit_code: i32,
    },
    /// Human-readable failure description; always followed by `Done`.
    Error(String),
}

impl OutputEvent {
    /// The SSE event name for this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stdout(_) => "stdout",
            Self::Stderr(_) => "stderr",
            Self::Done { .. } => "done",
            Self::Error(_) => "error",
        }
    }
}
