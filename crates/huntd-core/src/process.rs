//! Process management utilities
//!
//! External commands run with captured output, a hard deadline, and a
//! cooperative cancellation flag. A child that outlives either is killed.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors from running an external command
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },

    #[error("command timed out after {secs}s")]
    TimedOut { secs: u64 },

    #[error("command cancelled")]
    Cancelled,

    #[error("i/o error while waiting for command: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared flag a caller flips to abandon in-flight work
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; every holder of a clone observes it
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Run a command to completion and return its stdout.
///
/// The child is killed when `timeout` elapses or `cancel` is set.
/// Non-zero exit is reported as [`ProcessError::Failed`] with stderr attached.
pub fn run_with_timeout(
    cmd: &mut Command,
    timeout: Duration,
    cancel: &CancelToken,
) -> Result<String, ProcessError> {
    if cancel.is_cancelled() {
        return Err(ProcessError::Cancelled);
    }

    let program = cmd.get_program().to_string_lossy().to_string();
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ProcessError::Spawn { program, source })?;

    // Drain both pipes concurrently so a chatty child never blocks on a full pipe
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let started = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if cancel.is_cancelled() {
            kill(&mut child);
            return Err(ProcessError::Cancelled);
        }
        if started.elapsed() >= timeout {
            kill(&mut child);
            return Err(ProcessError::TimedOut {
                secs: timeout.as_secs(),
            });
        }
        thread::sleep(POLL_INTERVAL);
    };

    let stdout = stdout.join().unwrap_or_default();
    let stderr = stderr.join().unwrap_or_default();

    if !status.success() {
        return Err(ProcessError::Failed {
            status: status.to_string(),
            stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn kill(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
