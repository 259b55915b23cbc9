//! Synchronous and streaming command executors.
//!
//! Both executors tokenize the raw command line, spawn the argument
//! vector directly (no shell), and run the child rooted at the sandbox
//! directory. Every failure mode is normalized into the result/event
//! vocabulary of [`super::result`]; nothing here returns an error to the
//! caller.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::command::CommandSpec;
use super::result::{ExecutionResult, OutputEvent, FAILURE_EXIT_CODE, TIMEOUT_EXIT_CODE};
use crate::error::{Result, SandboxError};
use crate::parser;

/// Capacity of the streamed-event channel.
const EVENT_BUFFER: usize = 64;

/// Command executor bound to a fixed sandbox root.
///
/// The root is the working directory of every child this executor
/// spawns; there is no per-invocation override.
#[derive(Debug, Clone)]
pub struct Executor {
    sandbox_root: PathBuf,
}

impl Executor {
    /// Create an executor rooted at the given sandbox directory.
    pub fn new(sandbox_root: impl Into<PathBuf>) -> Self {
        Self {
            sandbox_root: sandbox_root.into(),
        }
    }

    /// The directory every spawned command runs in.
    pub fn sandbox_root(&self) -> &Path {
        &self.sandbox_root
    }

    /// Run a command to completion or timeout and capture its output.
    ///
    /// This never fails past its boundary: parse and spawn errors come
    /// back as exit code [`FAILURE_EXIT_CODE`], a timeout as
    /// [`TIMEOUT_EXIT_CODE`] with the conventional message, and a normal
    /// exit as the child's real status with both streams captured.
    pub async fn run(&self, spec: &CommandSpec) -> ExecutionResult {
        match self.try_run(spec).await {
            Ok(result) => result,
            Err(SandboxError::Timeout { secs }) => {
                debug!(command = %spec.raw, secs, "command timed out");
                ExecutionResult::timed_out(secs)
            }
            Err(e) => {
                warn!(command = %spec.raw, error = %e, "command failed to execute");
                ExecutionResult::failed(e)
            }
        }
    }

    async fn try_run(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        let args = parser::parse(&spec.raw)?;
        let mut child = sandbox_command(&self.sandbox_root, &args)
            .spawn()
            .map_err(SandboxError::Spawn)?;

        let (Some(mut stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take())
        else {
            kill_and_reap(&mut child).await;
            return Err(SandboxError::Io(std::io::Error::other(
                "child pipes unavailable",
            )));
        };

        // Drain both pipes off-task so a child filling one pipe can
        // never deadlock against the wait below.
        let stdout_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).await.map(|_| buf)
        });
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf).await.map(|_| buf)
        });

        let status = match spec.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status?,
                Err(_) => {
                    // Kill and reap before reporting, so the timeout
                    // result never leaves a zombie behind.
                    kill_and_reap(&mut child).await;
                    stdout_task.abort();
                    stderr_task.abort();
                    return Err(SandboxError::Timeout {
                        secs: limit.as_secs(),
                    });
                }
            },
            None => child.wait().await?,
        };

        let stdout = stdout_task
            .await
            .map_err(|e| SandboxError::Io(std::io::Error::other(e)))??;
        let stderr = stderr_task
            .await
            .map_err(|e| SandboxError::Io(std::io::Error::other(e)))??;

        Ok(ExecutionResult::completed(
            String::from_utf8_lossy(&stdout).into_owned(),
            String::from_utf8_lossy(&stderr).into_owned(),
            exit_code(status),
        ))
    }

    /// Run a command and stream its output line by line.
    ///
    /// Returns a receiver yielding [`OutputEvent`]s: zero or more
    /// `Stdout`/`Stderr` lines as the child produces them, then exactly
    /// one `Done` (optionally preceded by one `Error`). The producer task
    /// owns the child; by the time the terminal event is delivered the
    /// process has been reaped on every path, timeout and fault included.
    /// Dropping the receiver also kills and reaps the child.
    ///
    /// Lines are delivered as they arrive rather than after exit, and the
    /// timeout is checked against the wall clock from spawn, so timeout
    /// response latency is bounded by the timer rather than by output.
    pub fn run_stream(&self, spec: &CommandSpec) -> mpsc::Receiver<OutputEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let root = self.sandbox_root.clone();
        let spec = spec.clone();

        tokio::spawn(stream_task(root, spec, tx));

        rx
    }
}

/// Build the child process invocation for an argument vector.
fn sandbox_command(root: &Path, args: &[String]) -> Command {
    let mut cmd = Command::new(&args[0]);
    cmd.args(&args[1..])
        .current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

/// Map an exit status to the reported code.
///
/// On Unix a signal-terminated child reports 128 + signal, matching
/// shell convention.
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or_else(|| {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(sig) = status.signal() {
                return 128 + sig;
            }
        }
        FAILURE_EXIT_CODE
    })
}

/// Event-producing task behind [`Executor::run_stream`].
///
/// The running loop multiplexes both pipe readers against the deadline
/// and receiver closure with `select!`; `read_until` is cancel-safe
/// (partial reads stay in the buffer), so a timer or the other channel
/// winning a round never loses output. Per-channel line order is
/// preserved; interleaving across channels follows arrival.
///
/// Lines are read as raw bytes and decoded lossily, so a child emitting
/// invalid UTF-8 still streams (with replacement characters) instead of
/// faulting.
async fn stream_task(root: PathBuf, spec: CommandSpec, tx: mpsc::Sender<OutputEvent>) {
    let started = Instant::now();
    let deadline = spec.timeout.map(|t| started + t);
    let timeout_secs = spec.timeout.map(|t| t.as_secs()).unwrap_or_default();

    let args = match parser::parse(&spec.raw) {
        Ok(args) => args,
        Err(e) => return fail(&tx, e).await,
    };

    let mut child = match sandbox_command(&root, &args).spawn() {
        Ok(child) => child,
        Err(e) => return fail(&tx, SandboxError::Spawn(e)).await,
    };

    // Pipes were requested at spawn; treat their absence like any other
    // runtime fault instead of panicking.
    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        kill_and_reap(&mut child).await;
        let io = std::io::Error::other("child pipes unavailable");
        return fail(&tx, SandboxError::Io(io)).await;
    };

    let mut stdout_reader = BufReader::new(stdout);
    let mut stderr_reader = BufReader::new(stderr);
    let mut stdout_buf = Vec::new();
    let mut stderr_buf = Vec::new();
    let mut stdout_open = true;
    let mut stderr_open = true;

    while stdout_open || stderr_open {
        tokio::select! {
            read = stdout_reader.read_until(b'\n', &mut stdout_buf), if stdout_open => match read {
                Ok(0) => {
                    stdout_open = false;
                    // A cancelled partial read followed by EOF leaves a
                    // final unterminated line in the buffer.
                    if !stdout_buf.is_empty() {
                        let line = take_line(&mut stdout_buf);
                        if tx.send(OutputEvent::Stdout(line)).await.is_err() {
                            return kill_and_reap(&mut child).await;
                        }
                    }
                }
                Ok(_) => {
                    let line = take_line(&mut stdout_buf);
                    if tx.send(OutputEvent::Stdout(line)).await.is_err() {
                        return kill_and_reap(&mut child).await;
                    }
                }
                Err(e) => {
                    kill_and_reap(&mut child).await;
                    return fail(&tx, SandboxError::Io(e)).await;
                }
            },
            read = stderr_reader.read_until(b'\n', &mut stderr_buf), if stderr_open => match read {
                Ok(0) => {
                    stderr_open = false;
                    if !stderr_buf.is_empty() {
                        let line = take_line(&mut stderr_buf);
                        if tx.send(OutputEvent::Stderr(line)).await.is_err() {
                            return kill_and_reap(&mut child).await;
                        }
                    }
                }
                Ok(_) => {
                    let line = take_line(&mut stderr_buf);
                    if tx.send(OutputEvent::Stderr(line)).await.is_err() {
                        return kill_and_reap(&mut child).await;
                    }
                }
                Err(e) => {
                    kill_and_reap(&mut child).await;
                    return fail(&tx, SandboxError::Io(e)).await;
                }
            },
            _ = tx.closed() => {
                // Receiver gone: nothing left to report to, but the
                // child must not keep running unattended.
                return kill_and_reap(&mut child).await;
            }
            _ = deadline_elapsed(deadline) => {
                return timed_out(&tx, &mut child, timeout_secs).await;
            }
        }
    }

    // Both pipes hit EOF; the wait for the exit status is still bounded
    // by the same deadline.
    let status = match deadline {
        Some(deadline) => match tokio::time::timeout_at(deadline, child.wait()).await {
            Ok(status) => status,
            Err(_) => return timed_out(&tx, &mut child, timeout_secs).await,
        },
        None => child.wait().await,
    };

    match status {
        Ok(status) => {
            let _ = tx
                .send(OutputEvent::Done {
                    exit_code: exit_code(status),
                })
                .await;
        }
        Err(e) => fail(&tx, SandboxError::Io(e)).await,
    }
}

/// Take the accumulated line out of the buffer: strip one trailing
/// newline, decode lossily, leave the buffer empty for the next read.
fn take_line(buf: &mut Vec<u8>) -> String {
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    let line = String::from_utf8_lossy(buf).into_owned();
    buf.clear();
    line
}

/// Resolves when the deadline passes; pends forever without one.
async fn deadline_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Kill the child and collect its exit status.
///
/// `Child::kill` sends the kill signal and waits, so the process is
/// reaped before any terminal event goes out.
async fn kill_and_reap(child: &mut Child) {
    if let Err(e) = child.kill().await {
        debug!(error = %e, "kill after termination trigger failed");
    }
}

/// Emit the timeout terminal pair: `Error` then `Done(124)`.
async fn timed_out(tx: &mpsc::Sender<OutputEvent>, child: &mut Child, secs: u64) {
    kill_and_reap(child).await;
    debug!(secs, "streamed command timed out");
    let _ = tx
        .send(OutputEvent::Error(format!(
            "Command timed out after {secs} seconds"
        )))
        .await;
    let _ = tx
        .send(OutputEvent::Done {
            exit_code: TIMEOUT_EXIT_CODE,
        })
        .await;
}

/// Emit the failure terminal pair: `Error` then `Done(1)`.
async fn fail(tx: &mpsc::Sender<OutputEvent>, err: SandboxError) {
    warn!(error = %err, "streamed command failed to execute");
    let _ = tx
        .send(OutputEvent::Error(format!(
            "Failed to execute command: {err}"
        )))
        .await;
    let _ = tx
        .send(OutputEvent::Done {
            exit_code: FAILURE_EXIT_CODE,
        })
        .await;
}
