//! # sandbox-runtime
//!
//! An API server for executing commands and managing files in a sandbox.
//!
//! Commands arrive as plain strings, are word-split with POSIX quoting
//! rules (never handed to a shell), and run as child processes rooted at
//! a fixed sandbox directory. Two execution modes are offered: a
//! synchronous mode that captures all output, and a streaming mode that
//! delivers output line by line as it is produced. Both enforce an
//! optional wall-clock timeout and fold every failure into a fixed
//! result vocabulary (exit code 124 for timeouts, 1 for anything else
//! that kept the command from running).
//!
//! Isolation of the sandbox itself (namespaces, seccomp, chroot) is the
//! deployment environment's job, not this crate's.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use sandbox_runtime::{CommandSpec, Executor};
//!
//! #[tokio::main]
//! async fn main() {
//!     sandbox_runtime::logging::try_init().ok();
//!
//!     let executor = Executor::new("/app");
//!     let spec = CommandSpec::new("echo 'hello world'").timeout(Duration::from_secs(30));
//!
//!     let result = executor.run(&spec).await;
//!     println!("exit {}: {}", result.exit_code, result.stdout);
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod logging;
pub mod parser;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SandboxError};
pub use execution::{
    CommandSpec, ExecutionResult, Executor, OutputEvent, FAILURE_EXIT_CODE, TIMEOUT_EXIT_CODE,
};
