use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("\u{2191}/k", "Move up"),
            ("\u{2193}/j", "Move down"),
            ("g / G", "First / last row"),
            ("Enter", "Expand block / open transaction"),
            ("f / t", "Open sender / recipient account"),
            ("Esc / Bksp", "Back to latest blocks"),
        ],
    ),
    (
        "Go to",
        &[
            ("/", "Open the go-to prompt"),
            ("Enter", "Open address or transaction hash"),
            ("Esc", "Cancel"),
        ],
    ),
    (
        "Other",
        &[
            ("r", "Retry a failed request"),
            ("?", "Toggle this help"),
            ("q", "Quit"),
        ],
    ),
];

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Returns true if it consumed the event
    pub fn handle_key(&mut self, _key: KeyEvent) -> bool {
        if self.visible {
            self.visible = false;
            true
        } else {
            false
        }
    }

    fn lines() -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, (title, keys)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                *title,
                THEME.accent_style().add_modifier(Modifier::BOLD),
            )));
            for (key, action) in keys.iter() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {key:<11}"), THEME.accent_style()),
                    Span::styled(*action, Style::default().fg(THEME.text)),
                ]));
            }
        }
        lines
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let popup_width = area.width * 60 / 100;
        let popup_height = area.height * 70 / 100;
        let x = area.x + (area.width - popup_width) / 2;
        let y = area.y + (area.height - popup_height) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .style(Style::default().bg(THEME.surface));

        let paragraph = Paragraph::new(Self::lines())
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::*;
    use crate::components::key;

    #[test]
    fn test_any_key_closes() {
        let mut help = HelpOverlay::new();
        assert!(!help.handle_key(key(KeyCode::Char('x'))));
        help.toggle();
        assert!(help.handle_key(key(KeyCode::Char('x'))));
        assert!(!help.visible);
    }

    #[test]
    fn test_lists_every_back_key() {
        let text: Vec<String> = HelpOverlay::lines().iter().map(|l| l.to_string()).collect();
        assert!(
            text.iter()
                .any(|l| l.contains("Esc / Bksp") && l.contains("Back to latest blocks"))
        );
    }
}
