use std::path::{Path, PathBuf};
use std::sync::Mutex;

use toml::Table;
use tracing::debug;

use crate::{Result, Settings};

/// Key-value persistence primitive the settings are stored in.
pub trait SettingsBackend: Send + Sync {
    /// The stored record, or `None` when nothing has been saved yet.
    fn load_data(&self) -> Result<Option<Table>>;

    fn save_data(&self, data: &Table) -> Result<()>;
}

/// Settings stored as a TOML file.
#[derive(Debug, Clone)]
pub struct TomlFileBackend {
    path: PathBuf,
}

impl TomlFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend at the platform config location.
    pub fn at_default_location() -> Self {
        Self::new(Self::default_path())
    }

    /// Get settings file path
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "redline", "redline") {
            dirs.config_dir().join("settings.toml")
        } else {
            PathBuf::from("~/.redline/settings.toml")
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsBackend for TomlFileBackend {
    fn load_data(&self) -> Result<Option<Table>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let table: Table = toml::from_str(&content)?;
        Ok(Some(table))
    }

    fn save_data(&self, data: &Table) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(data)?;
        std::fs::write(&self.path, content)?;
        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// In-process backend, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: Mutex<Option<Table>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Table) -> Self {
        Self {
            data: Mutex::new(Some(data)),
        }
    }

    pub fn data(&self) -> Option<Table> {
        self.data.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl SettingsBackend for MemoryBackend {
    fn load_data(&self) -> Result<Option<Table>> {
        Ok(self.data())
    }

    fn save_data(&self, data: &Table) -> Result<()> {
        if let Ok(mut stored) = self.data.lock() {
            *stored = Some(data.clone());
        }
        Ok(())
    }
}

/// Loaded settings plus the backend they persist to.
pub struct SettingsStore {
    backend: Box<dyn SettingsBackend>,
    current: Settings,
}

impl SettingsStore {
    /// Load settings, writing the defaults on first use.
    pub fn open(backend: Box<dyn SettingsBackend>) -> Result<Self> {
        let stored = backend.load_data()?;
        let current = match &stored {
            Some(table) => Settings::merge_over_defaults(table),
            None => {
                let defaults = Settings::default();
                backend.save_data(&defaults.to_table()?)?;
                defaults
            }
        };
        Ok(Self { backend, current })
    }

    /// Re-read the backend and merge over defaults.
    pub fn load(&self) -> Result<Settings> {
        Ok(self
            .backend
            .load_data()?
            .map(|table| Settings::merge_over_defaults(&table))
            .unwrap_or_default())
    }

    pub fn settings(&self) -> &Settings {
        &self.current
    }

    /// Persist the full current record.
    pub fn save(&self) -> Result<()> {
        self.backend.save_data(&self.current.to_table()?)
    }

    /// Apply one change and persist it immediately. Nothing changes in
    /// memory unless the write succeeds.
    pub fn update<F>(&mut self, change: F) -> Result<&Settings>
    where
        F: FnOnce(&mut Settings) -> Result<()>,
    {
        let mut next = self.current.clone();
        change(&mut next)?;
        self.backend.save_data(&next.to_table()?)?;
        self.current = next;
        Ok(&self.current)
    }

    pub fn reset(&mut self) -> Result<&Settings> {
        self.update(|settings| {
            *settings = Settings::default();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, SettingKey};

    #[test]
    fn test_open_empty_store_yields_defaults_and_persists_them() {
        let store = SettingsStore::open(Box::new(MemoryBackend::new())).unwrap();

        assert_eq!(store.settings(), &Settings::default());
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_open_partial_store_merges() {
        let stored: Table = toml::from_str(r#"profile = "work""#).unwrap();
        let store = SettingsStore::open(Box::new(MemoryBackend::with_data(stored))).unwrap();

        assert_eq!(store.settings().profile, "work");
        assert_eq!(store.settings().cli_path, "redact");
    }

    #[test]
    fn test_update_persists_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let mut store = SettingsStore::open(Box::new(TomlFileBackend::new(&path))).unwrap();

        store
            .update(|s| s.set(SettingKey::Profile, "personal"))
            .unwrap();

        let reopened = SettingsStore::open(Box::new(TomlFileBackend::new(&path))).unwrap();
        assert_eq!(reopened.settings().profile, "personal");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("profile = \"personal\""));
    }

    #[test]
    fn test_failed_change_leaves_settings_untouched() {
        let mut store = SettingsStore::open(Box::new(MemoryBackend::new())).unwrap();

        let result = store.update(|s| s.set(SettingKey::EnableLog, "sometimes"));

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_save_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let backend = TomlFileBackend::new(dir.path().join("s.toml"));
        let store = SettingsStore::open(Box::new(backend.clone())).unwrap();

        store.save().unwrap();
        let first = std::fs::read_to_string(backend.path()).unwrap();
        store.save().unwrap();
        let second = std::fs::read_to_string(backend.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_unstorable_value_is_rejected_before_commit() {
        let mut store = SettingsStore::open(Box::new(MemoryBackend::new())).unwrap();

        let result = store.update(|s| s.set(SettingKey::TimeoutSecs, &u64::MAX.to_string()));

        assert!(matches!(result, Err(ConfigError::Serialize(_))));
        assert_eq!(store.settings().timeout_secs, None);
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut store = SettingsStore::open(Box::new(MemoryBackend::new())).unwrap();
        store.update(|s| s.set(SettingKey::UseShell, "true")).unwrap();

        store.reset().unwrap();

        assert_eq!(store.settings(), &Settings::default());
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "cliPath = [unterminated").unwrap();

        let result = SettingsStore::open(Box::new(TomlFileBackend::new(&path)));

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
