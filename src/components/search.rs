use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::events::SearchTarget;
use crate::theme::THEME;

/// Go-to prompt for jumping straight to an address or transaction.
/// Input is append-only: type, `Backspace`, `Ctrl-U` to clear.
#[derive(Default)]
pub struct SearchBar {
    pub active: bool,
    query: String,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self) {
        self.query.clear();
        self.active = true;
    }

    /// Returns the target once the user submits a non-empty query.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SearchTarget> {
        if !self.active {
            return None;
        }

        match key.code {
            KeyCode::Enter => {
                self.active = false;
                return SearchTarget::parse(&std::mem::take(&mut self.query));
            }
            KeyCode::Esc => self.active = false,
            KeyCode::Backspace => {
                self.query.pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.clear()
            }
            KeyCode::Char(c) if c.is_ascii_graphic() => self.query.push(c),
            _ => {}
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        // Wide enough for a full transaction hash plus borders
        let width = area.width.min(72);
        let popup = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + 2,
            width,
            3,
        );
        frame.render_widget(Clear, popup);

        let prompt = Block::default()
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .title(" Go to (address / tx hash) ")
            .style(Style::default().bg(THEME.surface));
        let inner = prompt.inner(popup);
        frame.render_widget(prompt, popup);

        let text = if self.query.is_empty() {
            Line::from(Span::styled("0x...", THEME.muted_style()))
        } else {
            Line::from(vec![
                Span::styled(self.query.as_str(), Style::default().fg(THEME.text)),
                Span::styled("_", THEME.accent_style()),
            ])
        };
        frame.render_widget(Paragraph::new(text), inner);
    }
}
