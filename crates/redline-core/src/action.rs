//! The "Redact file" action: resolve, build, run, present.

use std::path::Path;

use redline_config::Settings;
use tracing::{error, info, warn};

use crate::command::CommandSpec;
use crate::error::CoreError;
use crate::host::{CancelHandle, Presenter, RunOptions, Runner, VaultAdapter};
use crate::invocation::{InvocationRecord, RunOutcome};
use crate::present::Presentation;

/// Everything one invocation needs. Settings are read once, when the
/// action starts.
pub struct ActionContext<'a> {
    pub settings: &'a Settings,
    pub vault: &'a dyn VaultAdapter,
    pub runner: &'a dyn Runner,
    pub presenter: &'a dyn Presenter,
    pub cancel: Option<CancelHandle>,
}

/// Redact one vault file.
///
/// Every path ends in a notice or a modal. Returns `None` when the action
/// was refused before any process started (non-local vault, folder).
pub async fn redact_file(ctx: &ActionContext<'_>, file: &Path) -> Option<InvocationRecord> {
    let settings = ctx.settings.clone();

    let Some(target) = ctx.vault.resolve_absolute(file) else {
        refuse(ctx.presenter, CoreError::UnsupportedEnvironment);
        return None;
    };
    if ctx.vault.is_folder(file) {
        refuse(ctx.presenter, CoreError::NotAFile(target));
        return None;
    }

    let record = match CommandSpec::from_settings(&settings, &target) {
        Ok(command) => {
            let rendered = command.display();
            info!(command = %rendered, "Running redaction");

            let mut options = RunOptions::from_settings(&settings);
            if let Some(cancel) = &ctx.cancel {
                options = options.with_cancel(cancel.clone());
            }
            let outcome = ctx.runner.run(&command, &options).await;
            InvocationRecord::new(target, rendered, outcome)
        }
        Err(e) => InvocationRecord::new(
            target.clone(),
            CommandSpec::attempted_line(&settings, &target),
            RunOutcome::ProcessError {
                message: e.to_string(),
                stderr: String::new(),
            },
        ),
    };

    let presentation = Presentation::decide(&record, settings.enable_log);
    log_presentation(&presentation);
    ctx.presenter.present(&presentation);

    Some(record)
}

fn refuse(presenter: &dyn Presenter, reason: CoreError) {
    let message = reason.to_string();
    warn!("{}", message);
    presenter.notice(&message);
}

fn log_presentation(presentation: &Presentation) {
    match presentation {
        Presentation::Notice(message) => info!("{}", message),
        Presentation::Modal(modal) if modal.is_failure() => {
            error!("{}: {}", modal.title(), modal.body())
        }
        Presentation::Modal(modal) => info!("{}: {}", modal.title(), modal.body()),
    }
}
