pub mod check;
pub mod completions;
pub mod config;
pub mod redact;
pub mod settings;

use anyhow::{Context, Result};
use redline_config::{SettingsStore, TomlFileBackend};
use redline_core::{LocalVault, UnsupportedVault, VaultAdapter};
use std::path::PathBuf;

use crate::cli::Cli;

/// Settings file backend, honouring `--config`.
pub fn settings_backend(cli: &Cli) -> TomlFileBackend {
    match &cli.config {
        Some(path) => TomlFileBackend::new(path),
        None => TomlFileBackend::at_default_location(),
    }
}

pub fn open_store(cli: &Cli) -> Result<SettingsStore> {
    let backend = settings_backend(cli);
    let path = backend.path().to_path_buf();
    SettingsStore::open(Box::new(backend))
        .with_context(|| format!("Failed to load settings from {}", path.display()))
}

/// The vault to act on: a local directory (default: the current one) or
/// a remote location that cannot be redacted.
pub fn open_vault(cli: &Cli) -> Result<Box<dyn VaultAdapter>> {
    let Some(location) = &cli.vault else {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        return Ok(Box::new(LocalVault::new(cwd)));
    };

    if let Some(path) = location.strip_prefix("file://") {
        return Ok(Box::new(LocalVault::new(PathBuf::from(path))));
    }
    if location.contains("://") {
        return Ok(Box::new(UnsupportedVault {
            location: location.clone(),
        }));
    }
    Ok(Box::new(LocalVault::new(PathBuf::from(location))))
}
