//! Presentation rules for a finished invocation
//!
//! | outcome | log toggle | presentation |
//! |---|---|---|
//! | success | on | modal with sanitized stdout |
//! | success | off | notice naming the file |
//! | failure | any | modal with summary and sanitized stderr |

use crate::invocation::InvocationRecord;
use crate::sanitize::strip_ansi;

pub const SUCCESS_TITLE: &str = "Redaction Complete";
pub const FAILURE_TITLE: &str = "Redaction Failed";
pub const EMPTY_OUTPUT: &str = "No output.";

/// Title and body of a result dialog. Both are fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    title: String,
    body: String,
}

impl Modal {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_failure(&self) -> bool {
        self.title == FAILURE_TITLE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Transient, auto-dismissing message.
    Notice(String),
    Modal(Modal),
}

impl Presentation {
    pub fn decide(record: &InvocationRecord, enable_log: bool) -> Self {
        let outcome = &record.outcome;

        match outcome.failure_summary() {
            None if enable_log => {
                let stdout = strip_ansi(outcome.stdout());
                let body = if stdout.trim().is_empty() {
                    EMPTY_OUTPUT.to_string()
                } else {
                    stdout.trim_end().to_string()
                };
                Self::Modal(Modal::new(SUCCESS_TITLE, body))
            }
            None => Self::Notice(format!("Redacted {}", record.file_name())),
            Some(summary) => {
                let stderr = strip_ansi(outcome.stderr());
                let body = if stderr.trim().is_empty() {
                    summary
                } else {
                    format!("{}\n\n{}", summary, stderr.trim_end())
                };
                Self::Modal(Modal::new(FAILURE_TITLE, body))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::RunOutcome;
    use std::path::PathBuf;

    fn record(outcome: RunOutcome) -> InvocationRecord {
        InvocationRecord::new(
            PathBuf::from("/vault/notes/a.md"),
            "redact".to_string(),
            outcome,
        )
    }

    fn exited(code: i32, stdout: &str, stderr: &str) -> RunOutcome {
        RunOutcome::Exited {
            code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_success_with_log_shows_sanitized_stdout() {
        let presentation =
            Presentation::decide(&record(exited(0, "\x1b[32mReplaced: 3\x1b[0m", "")), true);

        assert_eq!(
            presentation,
            Presentation::Modal(Modal::new("Redaction Complete", "Replaced: 3"))
        );
    }

    #[test]
    fn test_trailing_newlines_are_trimmed() {
        let presentation = Presentation::decide(&record(exited(0, "  Replaced: 3\n\n", "")), true);

        assert_eq!(
            presentation,
            Presentation::Modal(Modal::new(SUCCESS_TITLE, "  Replaced: 3"))
        );
    }

    #[test]
    fn test_success_with_log_and_no_output_uses_placeholder() {
        let presentation = Presentation::decide(&record(exited(0, "\x1b[0m\n", "")), true);

        assert_eq!(
            presentation,
            Presentation::Modal(Modal::new(SUCCESS_TITLE, EMPTY_OUTPUT))
        );
    }

    #[test]
    fn test_success_without_log_is_a_notice() {
        let presentation = Presentation::decide(&record(exited(0, "Replaced: 3", "")), false);

        assert_eq!(presentation, Presentation::Notice("Redacted a.md".to_string()));
    }

    #[test]
    fn test_failure_always_opens_modal() {
        for enable_log in [true, false] {
            let presentation = Presentation::decide(
                &record(exited(2, "Replaced: 1", "\x1b[31mprofile not found\x1b[0m")),
                enable_log,
            );

            let Presentation::Modal(modal) = presentation else {
                panic!("expected modal");
            };
            assert_eq!(modal.title(), "Redaction Failed");
            assert!(modal.is_failure());
            assert_eq!(modal.body(), "Process exited with code 2\n\nprofile not found");
            assert!(!modal.body().contains("Replaced"));
        }
    }

    #[test]
    fn test_start_failure_shows_process_error() {
        let presentation = Presentation::decide(
            &record(RunOutcome::ProcessError {
                message: "No such file or directory (os error 2)".to_string(),
                stderr: String::new(),
            }),
            false,
        );

        assert_eq!(
            presentation,
            Presentation::Modal(Modal::new(
                FAILURE_TITLE,
                "Failed to start process: No such file or directory (os error 2)"
            ))
        );
    }
}
