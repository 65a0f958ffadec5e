//! The per-invocation record (never persisted)

use std::path::PathBuf;
use std::time::Duration;

/// How a single run of the redaction tool ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The process ran and exited. `code` is `None` when it was terminated
    /// by a signal.
    Exited {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The process could not be started (or waited on).
    ProcessError { message: String, stderr: String },

    /// The configured timeout elapsed and the process was killed.
    TimedOut {
        after: Duration,
        stdout: String,
        stderr: String,
    },

    /// The caller cancelled the run and the process was killed.
    Cancelled { stdout: String, stderr: String },
}

impl RunOutcome {
    /// Only a zero exit code counts as success, whatever was written to
    /// standard error.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Exited { code: Some(0), .. })
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exited { code, .. } => *code,
            _ => None,
        }
    }

    pub fn stdout(&self) -> &str {
        match self {
            Self::Exited { stdout, .. }
            | Self::TimedOut { stdout, .. }
            | Self::Cancelled { stdout, .. } => stdout,
            Self::ProcessError { .. } => "",
        }
    }

    pub fn stderr(&self) -> &str {
        match self {
            Self::Exited { stderr, .. }
            | Self::ProcessError { stderr, .. }
            | Self::TimedOut { stderr, .. }
            | Self::Cancelled { stderr, .. } => stderr,
        }
    }

    /// One-line description of a failure; `None` on success.
    pub fn failure_summary(&self) -> Option<String> {
        match self {
            Self::Exited { code: Some(0), .. } => None,
            Self::Exited { code: Some(code), .. } => {
                Some(format!("Process exited with code {}", code))
            }
            Self::Exited { code: None, .. } => Some("Process terminated by signal".to_string()),
            Self::ProcessError { message, .. } => {
                Some(format!("Failed to start process: {}", message))
            }
            Self::TimedOut { after, .. } => {
                Some(format!("Process timed out after {}s", after.as_secs_f64()))
            }
            Self::Cancelled { .. } => Some("Process cancelled".to_string()),
        }
    }
}

/// Everything known about one invocation: the target, the command that
/// was run and how it ended.
#[derive(Debug, Clone)]
pub struct InvocationRecord {
    pub target: PathBuf,
    pub command: String,
    pub outcome: RunOutcome,
}

impl InvocationRecord {
    pub fn new(target: PathBuf, command: String, outcome: RunOutcome) -> Self {
        Self {
            target,
            command,
            outcome,
        }
    }

    /// File name of the target, for notices.
    pub fn file_name(&self) -> String {
        self.target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.target.display().to_string())
    }
}
