use anyhow::Result;

use crate::cli::Cli;

pub fn handle(cli: &Cli) -> Result<()> {
    let mut store = super::open_store(cli)?;
    redline_tui::run_settings(&mut store)
}
