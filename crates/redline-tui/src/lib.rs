mod clipboard;
mod modal;
mod presenter;
mod settings_panel;
mod ui;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use modal::{ModalAction, ModalView};
pub use presenter::TerminalPresenter;
pub use settings_panel::{PanelAction, PanelMode, SettingsPanel};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use redline_config::SettingsStore;
use redline_core::Modal;
use std::io::{self, Stdout};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run `body` on the alternate screen, restoring the terminal afterwards
/// even when `body` fails.
fn with_terminal<T>(body: impl FnOnce(&mut Term) -> Result<T>) -> Result<T> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = body(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Show a result dialog and block until it is dismissed.
pub fn show_modal(modal: &Modal) -> Result<()> {
    let mut clipboard = SystemClipboard::new();
    let mut view = ModalView::new(modal);

    with_terminal(|terminal| loop {
        terminal.draw(|f| ui::draw_modal(f, &view))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press
                && view.handle_key(key, &mut clipboard) == ModalAction::Close
            {
                return Ok(());
            }
        }
    })
}

/// Interactive settings form. Changes are saved as they are made.
pub fn run_settings(store: &mut SettingsStore) -> Result<()> {
    let mut panel = SettingsPanel::new();

    with_terminal(|terminal| loop {
        terminal.draw(|f| ui::draw_settings(f, &panel, store.settings()))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press
                && panel.handle_key(key, store) == PanelAction::Close
            {
                return Ok(());
            }
        }
    })
}
