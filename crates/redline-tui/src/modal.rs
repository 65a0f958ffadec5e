use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use redline_core::Modal;
use tracing::warn;

use crate::clipboard::ClipboardSink;

const PAGE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Continue,
    Close,
}

/// State of an open result dialog.
pub struct ModalView<'a> {
    pub modal: &'a Modal,
    pub scroll: u16,
    pub status_message: Option<String>,
}

impl<'a> ModalView<'a> {
    pub fn new(modal: &'a Modal) -> Self {
        Self {
            modal,
            scroll: 0,
            status_message: None,
        }
    }

    fn max_scroll(&self) -> u16 {
        let lines = self.modal.body().lines().count().saturating_sub(1);
        u16::try_from(lines).unwrap_or(u16::MAX)
    }

    pub fn scroll_down(&mut self, by: u16) {
        self.scroll = self.scroll.saturating_add(by).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, by: u16) {
        self.scroll = self.scroll.saturating_sub(by);
    }

    pub fn copy(&mut self, clipboard: &mut dyn ClipboardSink) {
        self.status_message = Some(match clipboard.set_text(self.modal.body()) {
            Ok(()) => "Copied to clipboard".to_string(),
            Err(e) => {
                warn!("Clipboard copy failed: {:#}", e);
                format!("Copy failed: {}", e)
            }
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent, clipboard: &mut dyn ClipboardSink) -> ModalAction {
        if is_interrupt(&key) {
            return ModalAction::Close;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => return ModalAction::Close,
            KeyCode::Char('c') | KeyCode::Char('y') => self.copy(clipboard),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_down(PAGE),
            KeyCode::PageUp => self.scroll_up(PAGE),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.scroll = self.max_scroll(),
            _ => {}
        }
        ModalAction::Continue
    }
}

/// Ctrl-C, which raw mode delivers as a key press instead of a signal.
pub(crate) fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
