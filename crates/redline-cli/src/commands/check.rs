use anyhow::{bail, Result};
use redline_runner::locate_executable;

use crate::cli::Cli;

pub fn handle(cli: &Cli) -> Result<()> {
    let store = super::open_store(cli)?;
    let settings = store.settings();

    match locate_executable(&settings.cli_path) {
        Ok(path) => {
            println!("✓ {} -> {}", settings.cli_path, path.display());
            Ok(())
        }
        Err(e) => bail!("Redaction executable '{}' not found: {}", settings.cli_path, e),
    }
}
