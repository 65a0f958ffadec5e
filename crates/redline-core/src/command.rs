//! Command construction for the external redaction tool
//!
//! Arguments are assembled in a fixed order: executable, target path,
//! `--profile <value>` (only when a profile is set), `--log` (only when
//! logging is enabled), then the extra arguments.

use std::path::Path;

use redline_config::Settings;

use crate::error::Result;

/// A fully assembled invocation of the redaction tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// Executed directly, without a shell.
    Direct { program: String, args: Vec<String> },

    /// A single command line interpreted by the system shell.
    Shell { line: String },
}

impl CommandSpec {
    /// Build the command for `target` (an absolute path) from the settings.
    ///
    /// In direct mode the extra arguments are split with POSIX shell-word
    /// rules; an unbalanced quote is reported as an error. In shell mode
    /// they are appended verbatim.
    pub fn from_settings(settings: &Settings, target: &Path) -> Result<Self> {
        let target = target.to_string_lossy();

        if settings.use_shell {
            return Ok(Self::Shell {
                line: shell_line(settings, &target),
            });
        }

        let mut args = vec![target.into_owned()];
        if !settings.profile.is_empty() {
            args.push("--profile".to_string());
            args.push(settings.profile.clone());
        }
        if settings.enable_log {
            args.push("--log".to_string());
        }
        if !settings.custom_args.trim().is_empty() {
            args.extend(shell_words::split(&settings.custom_args)?);
        }

        Ok(Self::Direct {
            program: settings.cli_path.clone(),
            args,
        })
    }

    /// The command line that would have run, for records of invocations
    /// whose arguments could not be assembled.
    pub fn attempted_line(settings: &Settings, target: &Path) -> String {
        shell_line(settings, &target.to_string_lossy())
    }

    /// Render the command for logs and dry runs.
    pub fn display(&self) -> String {
        match self {
            Self::Direct { program, args } => {
                let mut parts = Vec::with_capacity(1 + args.len());
                parts.push(program.as_str());
                parts.extend(args.iter().map(String::as_str));
                shell_words::join(parts)
            }
            Self::Shell { line } => line.clone(),
        }
    }
}

fn shell_line(settings: &Settings, target: &str) -> String {
    let mut line = format!("{} {}", settings.cli_path, double_quote(target));
    if !settings.profile.is_empty() {
        line.push_str(" --profile ");
        line.push_str(&double_quote(&settings.profile));
    }
    if settings.enable_log {
        line.push_str(" --log");
    }
    let extra = settings.custom_args.trim();
    if !extra.is_empty() {
        line.push(' ');
        line.push_str(extra);
    }
    line
}

/// Wrap in double quotes, escaping the characters the shell still
/// interprets inside them.
fn double_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
