use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "redline")]
#[command(about = "Redact notes in a vault with an external tool", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (default: platform config directory)
    #[arg(long, global = true, env = "REDLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Vault directory, or the URL of a remote vault
    #[arg(long, global = true, env = "REDLINE_VAULT")]
    pub vault: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Redact a file in place
    Redact {
        /// File to redact, relative to the vault or absolute
        file: PathBuf,

        /// Print the command instead of running it
        #[arg(long)]
        dry_run: bool,

        /// Print results as text instead of opening a dialog
        #[arg(long)]
        plain: bool,
    },

    /// Open the settings panel
    Settings,

    /// Inspect or change settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Check that the redaction executable can be found
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the settings file location
    Path,

    /// Set one setting (e.g. `cliPath /usr/local/bin/redact`)
    Set {
        /// Setting name, camelCase or snake_case
        key: String,

        /// New value; booleans accept true/false/on/off
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Restore all defaults
    Reset,
}
