//! Command specification.

use std::time::Duration;

/// A command line to be executed in the sandbox.
///
/// The raw string is tokenized by [`crate::parser::parse`] at execution
/// time; it is never handed to a shell.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// The command line to execute.
    pub raw: String,
    /// Maximum wall-clock execution time. `None` means unbounded.
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    /// Create a new command spec with no timeout.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            timeout: None,
        }
    }

    /// Set the execution timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the timeout from whole seconds; zero means no timeout.
    ///
    /// The HTTP layer accepts `timeout` in seconds where both absence and
    /// zero mean "run unbounded", so the normalization lives here.
    pub fn timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.timeout = secs.filter(|s| *s > 0).map(Duration::from_secs);
        self
    }
}
