//! Command execution engine.
//!
//! Two execution modes against one fixed sandbox root:
//! - synchronous: run to completion or timeout, capture both streams
//! - streaming: deliver output line by line as it is produced, with
//!   timeout-triggered cancellation
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use sandbox_runtime::execution::{CommandSpec, Executor};
//!
//! # async fn demo() {
//! let executor = Executor::new("/app");
//! let spec = CommandSpec::new("echo hello").timeout(Duration::from_secs(30));
//! let result = executor.run(&spec).await;
//! println!("{} (exit {})", result.stdout, result.exit_code);
//! # }
//! ```

mod command;
mod executor;
mod result;

pub use command::CommandSpec;
pub use executor::Executor;
pub use result::{ExecutionResult, OutputEvent, FAILURE_EXIT_CODE, TIMEOUT_EXIT_CODE};
