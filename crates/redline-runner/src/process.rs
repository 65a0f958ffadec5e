use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use redline_core::{CancelHandle, CommandSpec, RunOptions, RunOutcome, Runner};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// How long pipes are still drained once the child is gone, whether it
/// exited or was killed. A grandchild (a backgrounded job, a daemonized
/// helper) may inherit them and keep them open indefinitely.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

const CHUNK_SIZE: usize = 8 * 1024;

/// Runs each command as its own child process.
///
/// Invocations share nothing, so several may be in flight at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

enum Ending {
    Exited(std::io::Result<std::process::ExitStatus>),
    TimedOut,
    Cancelled,
}

#[async_trait]
impl Runner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec, options: &RunOptions) -> RunOutcome {
        let mut command = build_command(spec);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to start {}: {}", spec.display(), e);
                return RunOutcome::ProcessError {
                    message: e.to_string(),
                    stderr: String::new(),
                };
            }
        };
        debug!(pid = ?child.id(), "Started redaction process");

        let stdout = child.stdout.take().map(|s| StreamBuffer::capture(s, "stdout"));
        let stderr = child.stderr.take().map(|s| StreamBuffer::capture(s, "stderr"));

        let ending = tokio::select! {
            status = child.wait() => Ending::Exited(status),
            _ = expire(options.timeout) => Ending::TimedOut,
            _ = cancelled(options.cancel.as_ref()) => Ending::Cancelled,
        };

        if matches!(ending, Ending::TimedOut | Ending::Cancelled) {
            if let Err(e) = child.kill().await {
                warn!("Failed to kill redaction process: {}", e);
            }
        }

        let (stdout, stderr) = tokio::join!(
            StreamBuffer::collect(stdout, DRAIN_GRACE),
            StreamBuffer::collect(stderr, DRAIN_GRACE)
        );

        match ending {
            Ending::Exited(Ok(status)) => {
                debug!(code = ?status.code(), "Redaction process exited");
                RunOutcome::Exited {
                    code: status.code(),
                    stdout,
                    stderr,
                }
            }
            Ending::Exited(Err(e)) => RunOutcome::ProcessError {
                message: e.to_string(),
                stderr,
            },
            Ending::TimedOut => RunOutcome::TimedOut {
                after: options.timeout.unwrap_or_default(),
                stdout,
                stderr,
            },
            Ending::Cancelled => RunOutcome::Cancelled { stdout, stderr },
        }
    }
}

fn build_command(spec: &CommandSpec) -> Command {
    match spec {
        CommandSpec::Direct { program, args } => {
            let mut command = Command::new(program);
            command.args(args);
            command
        }
        CommandSpec::Shell { line } if cfg!(windows) => {
            let mut command = Command::new("cmd");
            command.arg("/C").arg(line);
            command
        }
        CommandSpec::Shell { line } => {
            let mut command = Command::new("sh");
            command.arg("-c").arg(line);
            command
        }
    }
}

async fn expire(timeout: Option<Duration>) {
    match timeout {
        Some(after) => tokio::time::sleep(after).await,
        None => std::future::pending::<()>().await,
    }
}

async fn cancelled(cancel: Option<&CancelHandle>) {
    match cancel {
        Some(handle) => handle.cancelled().await,
        None => std::future::pending::<()>().await,
    }
}

/// One output stream, accumulated chunk by chunk as it arrives.
struct StreamBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
    task: JoinHandle<()>,
}

impl StreamBuffer {
    fn capture<R>(mut reader: R, name: &'static str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let bytes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&bytes);

        let task = tokio::spawn(async move {
            let mut chunk = vec![0u8; CHUNK_SIZE];
            loop {
                match reader.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => {
                        trace!(stream = name, bytes = n, "Received output");
                        if let Ok(mut buffer) = sink.lock() {
                            buffer.extend_from_slice(&chunk[..n]);
                        }
                    }
                    Err(e) => {
                        warn!("Error reading {}: {}", name, e);
                        break;
                    }
                }
            }
        });

        Self { bytes, task }
    }

    /// Wait up to `grace` for the stream to close and decode what was
    /// received.
    async fn collect(buffer: Option<Self>, grace: Duration) -> String {
        let Some(mut buffer) = buffer else {
            return String::new();
        };

        if tokio::time::timeout(grace, &mut buffer.task).await.is_err() {
            debug!("Output pipe still open after the process ended");
            buffer.task.abort();
        }

        let bytes = buffer
            .bytes
            .lock()
            .map(|b| b.clone())
            .unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}
