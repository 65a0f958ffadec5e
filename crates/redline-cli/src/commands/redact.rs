use anyhow::Result;
use redline_core::{ActionContext, CancelHandle, CommandSpec, redact_file};
use redline_runner::ProcessRunner;
use redline_tui::TerminalPresenter;
use std::path::Path;
use tracing::{debug, warn};

use crate::cli::Cli;

pub async fn handle(cli: &Cli, file: &Path, dry_run: bool, plain: bool) -> Result<()> {
    let store = super::open_store(cli)?;
    let settings = store.settings();
    let vault = super::open_vault(cli)?;

    if dry_run {
        let Some(target) = vault.resolve_absolute(file) else {
            warn!("Vault has no local path; nothing would run");
            return Ok(());
        };
        match CommandSpec::from_settings(settings, &target) {
            Ok(command) => println!("{}", command.display()),
            Err(e) => println!("{}", e),
        }
        return Ok(());
    }

    let presenter = if plain {
        TerminalPresenter::plain()
    } else {
        TerminalPresenter::detect()
    };

    let cancel = CancelHandle::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupted, cancelling redaction");
            on_interrupt.cancel();
        }
    });

    let runner = ProcessRunner::new();
    let ctx = ActionContext {
        settings,
        vault: vault.as_ref(),
        runner: &runner,
        presenter: &presenter,
        cancel: Some(cancel),
    };
    redact_file(&ctx, file).await;
    interrupt.abort();

    Ok(())
}
