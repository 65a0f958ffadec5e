//! Host seams: where the vault lives, how results are shown and how the
//! external tool is run.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redline_config::Settings;
use tokio::sync::watch;

use crate::command::CommandSpec;
use crate::invocation::RunOutcome;
use crate::present::{Modal, Presentation};

/// Resolves vault-relative paths to absolute filesystem paths.
pub trait VaultAdapter: Send + Sync {
    /// `None` when the vault has no local filesystem behind it.
    fn resolve_absolute(&self, path: &Path) -> Option<PathBuf>;

    fn is_folder(&self, path: &Path) -> bool;
}

/// A vault backed by a local directory.
#[derive(Debug, Clone)]
pub struct LocalVault {
    root: PathBuf,
}

impl LocalVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl VaultAdapter for LocalVault {
    fn resolve_absolute(&self, path: &Path) -> Option<PathBuf> {
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(self.root.join(path))
        }
    }

    fn is_folder(&self, path: &Path) -> bool {
        self.resolve_absolute(path)
            .map(|p| p.is_dir())
            .unwrap_or(false)
    }
}

/// A vault reached through a non-local backend (e.g. a sync URL).
#[derive(Debug, Clone)]
pub struct UnsupportedVault {
    pub location: String,
}

impl VaultAdapter for UnsupportedVault {
    fn resolve_absolute(&self, _path: &Path) -> Option<PathBuf> {
        None
    }

    fn is_folder(&self, _path: &Path) -> bool {
        false
    }
}

/// Shows results to the user.
pub trait Presenter: Send + Sync {
    /// Transient, auto-dismissing message.
    fn notice(&self, message: &str);

    /// Blocking dialog; returns once the user dismisses it.
    fn modal(&self, modal: &Modal);

    fn present(&self, presentation: &Presentation) {
        match presentation {
            Presentation::Notice(message) => self.notice(message),
            Presentation::Modal(modal) => self.modal(modal),
        }
    }
}

/// Cancels in-flight runs. Cloning shares the same signal: one `cancel`
/// stops every run holding a clone, and the signal stays set.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    signal: Arc<watch::Sender<bool>>,
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self {
            signal: Arc::new(watch::channel(false).0),
        }
    }
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Runs started later also observe it.
    pub fn cancel(&self) {
        self.signal.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.signal.borrow()
    }

    /// Resolves once `cancel` has been called.
    pub async fn cancelled(&self) {
        let mut receiver = self.signal.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// `None` lets the process run to completion however long it takes.
    pub timeout: Option<Duration>,
    pub cancel: Option<CancelHandle>,
}

impl RunOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            timeout: settings.timeout_secs.map(Duration::from_secs),
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Runs one child process per call and reduces it to a [`RunOutcome`].
#[async_trait]
pub trait Runner: Send + Sync {
    async fn run(&self, command: &CommandSpec, options: &RunOptions) -> RunOutcome;
}
