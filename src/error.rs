//! Error types for sandbox-runtime.

use thiserror::Error;

/// Main error type for sandbox-runtime operations.
#[derive(Error, Debug)]
pub enum SandboxError {
    /// Command line could not be tokenized (unterminated quote, empty input).
    #[error("failed to parse command: {0}")]
    Parse(String),

    /// Child process could not be spawned.
    #[error("failed to spawn process: {0}")]
    Spawn(std::io::Error),

    /// I/O error while talking to a child or the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Command exceeded its wall-clock budget.
    #[error("command timed out after {secs} seconds")]
    Timeout {
        /// The configured timeout, in whole seconds.
        secs: u64,
    },

    /// A file path escaped the sandbox root or was otherwise unusable.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience Result type for sandbox-runtime operations.
pub type Result<T> = std::result::Result<T, SandboxError>;
