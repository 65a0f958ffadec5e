use anyhow::{Context, Result};
use redline_config::{ConfigError, SettingKey};

use crate::cli::{Cli, ConfigCommands};

pub fn handle(cli: &Cli, cmd: &ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show { json } => show(cli, *json),
        ConfigCommands::Path => {
            println!("{}", super::settings_backend(cli).path().display());
            Ok(())
        }
        ConfigCommands::Set { key, value } => set(cli, key, value),
        ConfigCommands::Reset => {
            let mut store = super::open_store(cli)?;
            store.reset().context("Failed to save settings")?;
            println!("✓ Settings reset to defaults");
            Ok(())
        }
    }
}

fn show(cli: &Cli, json: bool) -> Result<()> {
    let store = super::open_store(cli)?;
    let settings = store.settings();

    if json {
        println!("{}", serde_json::to_string_pretty(settings)?);
        return Ok(());
    }

    for key in SettingKey::ALL {
        println!("{:<12} = {}", key.name(), settings.get(key));
    }
    Ok(())
}

fn set(cli: &Cli, key: &str, value: &str) -> Result<()> {
    let setting = SettingKey::parse(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    let mut store = super::open_store(cli)?;

    let settings = store.update(|s| s.set(setting, value))?;
    tracing::info!("Set {} = {:?}", setting.name(), value);
    println!("✓ {} = {}", setting.name(), settings.get(setting));
    Ok(())
}
