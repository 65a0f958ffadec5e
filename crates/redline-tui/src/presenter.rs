use std::io::IsTerminal;

use redline_core::{Modal, Presenter};
use tracing::warn;

/// Presents results on the terminal.
///
/// Notices go to stderr. Modals open a full-screen dialog when stdin and
/// stdout are a terminal, and are printed as plain text otherwise.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPresenter {
    interactive: bool,
}

impl TerminalPresenter {
    pub fn detect() -> Self {
        Self {
            interactive: std::io::stdin().is_terminal() && std::io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { interactive: false }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl Presenter for TerminalPresenter {
    fn notice(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn modal(&self, modal: &Modal) {
        if self.interactive {
            match crate::show_modal(modal) {
                Ok(()) => return,
                Err(e) => warn!("Could not open dialog, printing instead: {:#}", e),
            }
        }
        println!("{}", render_plain(modal));
    }
}

fn render_plain(modal: &Modal) -> String {
    let rule = "─".repeat(modal.title().chars().count());
    format!("{}\n{}\n{}", modal.title(), rule, modal.body())
}
