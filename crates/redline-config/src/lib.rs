//! Settings for redline
//!
//! The persisted layout is a flat record with camelCase keys:
//!
//! ```toml
//! cliPath = "redact"
//! profile = ""
//! enableLog = false
//! customArgs = ""
//! useShell = false
//! # timeoutSecs = 300
//! ```
//!
//! Loading merges whatever is stored over the defaults, key by key, so
//! records written by older versions pick up defaults for new fields.

mod backend;

pub use backend::{MemoryBackend, SettingsBackend, SettingsStore, TomlFileBackend};

use serde::Serialize;
use thiserror::Error;
use toml::{Table, Value};
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown setting: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// The configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Redaction executable; absolute, or looked up on `PATH`.
    pub cli_path: String,

    /// Forwarded as `--profile <value>` when non-empty.
    pub profile: String,

    /// Adds `--log` and shows the tool's output after a successful run.
    pub enable_log: bool,

    /// Appended after the generated arguments.
    pub custom_args: String,

    /// Run through `sh -c` instead of executing directly.
    pub use_shell: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cli_path: default_cli_path(),
            profile: String::new(),
            enable_log: false,
            custom_args: String::new(),
            use_shell: false,
            timeout_secs: None,
        }
    }
}

fn default_cli_path() -> String {
    "redact".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    CliPath,
    Profile,
    EnableLog,
    CustomArgs,
    UseShell,
    TimeoutSecs,
}

impl SettingKey {
    pub const ALL: [SettingKey; 6] = [
        SettingKey::CliPath,
        SettingKey::Profile,
        SettingKey::EnableLog,
        SettingKey::CustomArgs,
        SettingKey::UseShell,
        SettingKey::TimeoutSecs,
    ];

    /// Persisted key name.
    pub fn name(self) -> &'static str {
        match self {
            SettingKey::CliPath => "cliPath",
            SettingKey::Profile => "profile",
            SettingKey::EnableLog => "enableLog",
            SettingKey::CustomArgs => "customArgs",
            SettingKey::UseShell => "useShell",
            SettingKey::TimeoutSecs => "timeoutSecs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SettingKey::CliPath => "Executable path",
            SettingKey::Profile => "Profile",
            SettingKey::EnableLog => "Enable log",
            SettingKey::CustomArgs => "Extra arguments",
            SettingKey::UseShell => "Use shell",
            SettingKey::TimeoutSecs => "Timeout (seconds)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SettingKey::CliPath => "Path to the redaction executable, or a name on PATH",
            SettingKey::Profile => "Passed as --profile; leave empty to omit",
            SettingKey::EnableLog => "Pass --log and show the tool output after each run",
            SettingKey::CustomArgs => "Appended to the command line as-is",
            SettingKey::UseShell => "Interpret the command line with the system shell",
            SettingKey::TimeoutSecs => "Kill the tool after this many seconds; empty for none",
        }
    }

    pub fn is_toggle(self) -> bool {
        matches!(self, SettingKey::EnableLog | SettingKey::UseShell)
    }

    /// Accepts the persisted camelCase name or its snake_case form.
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == key || snake_case(k.name()) == key)
    }
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl Settings {
    /// Shallow-merge a stored record over the defaults.
    ///
    /// Unknown keys and keys holding the wrong value type are skipped.
    pub fn merge_over_defaults(stored: &Table) -> Self {
        let mut settings = Settings::default();

        for (key, value) in stored {
            let Some(setting) = SettingKey::parse(key) else {
                debug!("Ignoring unknown setting {}", key);
                continue;
            };

            let applied = match (setting, value) {
                (SettingKey::CliPath, Value::String(s)) => {
                    settings.cli_path = s.clone();
                    true
                }
                (SettingKey::Profile, Value::String(s)) => {
                    settings.profile = s.clone();
                    true
                }
                (SettingKey::EnableLog, Value::Boolean(b)) => {
                    settings.enable_log = *b;
                    true
                }
                (SettingKey::CustomArgs, Value::String(s)) => {
                    settings.custom_args = s.clone();
                    true
                }
                (SettingKey::UseShell, Value::Boolean(b)) => {
                    settings.use_shell = *b;
                    true
                }
                (SettingKey::TimeoutSecs, Value::Integer(n)) if *n >= 0 => {
                    settings.timeout_secs = u64::try_from(*n).ok().filter(|secs| *secs > 0);
                    true
                }
                _ => false,
            };

            if !applied {
                warn!("Ignoring setting {} with unexpected value {}", key, value);
            }
        }

        settings
    }

    /// The flat record written to storage.
    pub fn to_table(&self) -> Result<Table> {
        Ok(Table::try_from(self)?)
    }

    /// Current value rendered as text (empty for an unset timeout).
    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::CliPath => self.cli_path.clone(),
            SettingKey::Profile => self.profile.clone(),
            SettingKey::EnableLog => self.enable_log.to_string(),
            SettingKey::CustomArgs => self.custom_args.clone(),
            SettingKey::UseShell => self.use_shell.to_string(),
            SettingKey::TimeoutSecs => self
                .timeout_secs
                .map(|secs| secs.to_string())
                .unwrap_or_default(),
        }
    }

    /// Set a field from its text form. No validation beyond the type.
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<()> {
        let invalid = || ConfigError::InvalidValue {
            key: key.name().to_string(),
            value: value.to_string(),
        };

        match key {
            SettingKey::CliPath => self.cli_path = value.to_string(),
            SettingKey::Profile => self.profile = value.to_string(),
            SettingKey::CustomArgs => self.custom_args = value.to_string(),
            SettingKey::EnableLog => self.enable_log = parse_bool(value).ok_or_else(invalid)?,
            SettingKey::UseShell => self.use_shell = parse_bool(value).ok_or_else(invalid)?,
            SettingKey::TimeoutSecs => {
                let value = value.trim();
                self.timeout_secs = if value.is_empty() || value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    let secs: u64 = value.parse().map_err(|_| invalid())?;
                    Some(secs).filter(|secs| *secs > 0)
                };
            }
        }
        Ok(())
    }

    /// Flip a boolean field; other fields are left alone.
    pub fn toggle(&mut self, key: SettingKey) {
        match key {
            SettingKey::EnableLog => self.enable_log = !self.enable_log,
            SettingKey::UseShell => self.use_shell = !self.use_shell,
            _ => {}
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
