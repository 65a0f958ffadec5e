use crossterm::event::{KeyCode, KeyEvent};
use redline_config::{SettingKey, SettingsStore};
use tracing::{info, warn};

use crate::modal::is_interrupt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    Browsing,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Continue,
    Close,
}

/// Form over the settings record. Every committed change is saved
/// before the panel moves on.
pub struct SettingsPanel {
    pub selected: usize,
    pub mode: PanelMode,
    pub input_buffer: String,
    pub status_message: Option<String>,
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self {
            selected: 0,
            mode: PanelMode::Browsing,
            input_buffer: String::new(),
            status_message: None,
        }
    }

    pub fn selected_key(&self) -> SettingKey {
        SettingKey::ALL[self.selected]
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % SettingKey::ALL.len();
    }

    pub fn previous(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(SettingKey::ALL.len() - 1);
    }

    /// Ctrl-C closes the panel from either mode, discarding an edit.
    pub fn handle_key(&mut self, key: KeyEvent, store: &mut SettingsStore) -> PanelAction {
        if is_interrupt(&key) {
            return PanelAction::Close;
        }

        match self.mode {
            PanelMode::Browsing => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return PanelAction::Close,
                KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => self.next(),
                KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => self.previous(),
                KeyCode::Enter | KeyCode::Char(' ') => self.activate(store),
                _ => {}
            },
            PanelMode::Editing => match key.code {
                KeyCode::Enter => self.commit_edit(store),
                KeyCode::Esc => self.cancel_edit(),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Char(c) => self.input_buffer.push(c),
                _ => {}
            },
        }
        PanelAction::Continue
    }

    /// Flip a toggle in place, or start editing a text field.
    fn activate(&mut self, store: &mut SettingsStore) {
        let key = self.selected_key();
        if key.is_toggle() {
            let result = store.update(|settings| {
                settings.toggle(key);
                Ok(())
            });
            match result {
                Ok(settings) => {
                    info!("Set {} = {}", key.name(), settings.get(key));
                    self.status_message = Some(format!("{} saved", key.label()));
                }
                Err(e) => self.report_failure(key, &e),
            }
        } else {
            self.input_buffer = store.settings().get(key);
            self.mode = PanelMode::Editing;
            self.status_message = None;
        }
    }

    fn commit_edit(&mut self, store: &mut SettingsStore) {
        let key = self.selected_key();
        let value = std::mem::take(&mut self.input_buffer);

        match store.update(|settings| settings.set(key, &value)) {
            Ok(_) => {
                info!("Set {} = {:?}", key.name(), value);
                self.status_message = Some(format!("{} saved", key.label()));
                self.mode = PanelMode::Browsing;
            }
            Err(e) => {
                self.report_failure(key, &e);
                self.input_buffer = value;
            }
        }
    }

    fn cancel_edit(&mut self) {
        self.input_buffer.clear();
        self.mode = PanelMode::Browsing;
        self.status_message = None;
    }

    fn report_failure(&mut self, key: SettingKey, error: &redline_config::ConfigError) {
        warn!("Failed to save {}: {}", key.name(), error);
        self.status_message = Some(format!("Error: {}", error));
    }
}
