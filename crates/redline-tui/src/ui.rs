use crate::modal::ModalView;
use crate::settings_panel::{PanelMode, SettingsPanel};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use redline_config::{SettingKey, Settings};

pub fn draw_modal(f: &mut Frame, view: &ModalView) {
    let area = centered_rect(80, 70, f.area());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let title_style = if view.modal.is_failure() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };

    let body = Paragraph::new(view.modal.body())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(format!(" {} ", view.modal.title()), title_style)),
        )
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0));
    f.render_widget(body, chunks[0]);

    let status = view.status_message.clone().unwrap_or_default();
    let help_text = vec![
        Span::styled("q/esc", Style::default().fg(Color::Yellow)),
        Span::raw(":close "),
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(":scroll "),
        Span::styled("c", Style::default().fg(Color::Yellow)),
        Span::raw(":copy "),
        Span::raw(status),
    ];
    let footer =
        Paragraph::new(Line::from(help_text)).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[1]);
}

pub fn draw_settings(f: &mut Frame, panel: &SettingsPanel, settings: &Settings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Fields
            Constraint::Length(4), // Description
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    let title = Paragraph::new("redline - Settings")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = SettingKey::ALL
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let value = if i == panel.selected && panel.mode == PanelMode::Editing {
                format!("{}_", panel.input_buffer)
            } else {
                display_value(settings, *key)
            };
            let line = format!("{:<20} {}", key.label(), value);
            let style = if i == panel.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Fields "));
    f.render_widget(list, chunks[1]);

    let description = Paragraph::new(panel.selected_key().description())
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(description, chunks[2]);

    let status = panel
        .status_message
        .clone()
        .unwrap_or_else(|| "Ready".to_string());
    let help_text = match panel.mode {
        PanelMode::Browsing => vec![
            Span::raw(status),
            Span::raw(" | "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(":quit "),
            Span::styled("j/k", Style::default().fg(Color::Yellow)),
            Span::raw(":move "),
            Span::styled("enter", Style::default().fg(Color::Yellow)),
            Span::raw(":edit/toggle"),
        ],
        PanelMode::Editing => vec![
            Span::raw(status),
            Span::raw(" | "),
            Span::styled("enter", Style::default().fg(Color::Yellow)),
            Span::raw(":save "),
            Span::styled("esc", Style::default().fg(Color::Yellow)),
            Span::raw(":cancel"),
        ],
    };
    let footer =
        Paragraph::new(Line::from(help_text)).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[3]);
}

fn display_value(settings: &Settings, key: SettingKey) -> String {
    if key.is_toggle() {
        let on = settings.get(key) == "true";
        return if on { "[x]" } else { "[ ]" }.to_string();
    }
    let value = settings.get(key);
    if value.is_empty() {
        "(none)".to_string()
    } else {
        value
    }
}

/// A rectangle of the given percentages, centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use redline_core::Modal;

    fn rendered(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let mut text = String::new();
        for row in buffer.content.chunks(width) {
            for cell in row {
                text.push_str(cell.symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_modal_renders_title_and_body() {
        let modal = Modal::new("Redaction Complete", "Replaced: 3");
        let view = ModalView::new(&modal);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal.draw(|f| draw_modal(f, &view)).unwrap();

        let text = rendered(&terminal);
        assert!(text.contains("Redaction Complete"));
        assert!(text.contains("Replaced: 3"));
    }

    #[test]
    fn test_settings_render_values() {
        let settings = Settings {
            profile: "work".to_string(),
            enable_log: true,
            ..Settings::default()
        };
        let panel = SettingsPanel::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal
            .draw(|f| draw_settings(f, &panel, &settings))
            .unwrap();

        let text = rendered(&terminal);
        assert!(text.contains("Executable path"));
        assert!(text.contains("redact"));
        assert!(text.contains("work"));
        assert!(text.contains("[x]"));
    }
}
