use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

pub struct StatusBar {
    pub pending: usize,
    pub error_message: Option<String>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            pending: 0,
            error_message: None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let bg = Block::default().style(THEME.header_style());
        frame.render_widget(bg, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(24)])
            .split(area);

        let left_content = if let Some(ref err) = self.error_message {
            Line::from(vec![
                Span::styled(
                    " ! ",
                    Style::default()
                        .fg(THEME.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(err.as_str(), Style::default().fg(THEME.warning)),
                Span::styled("  r", THEME.accent_style()),
                Span::styled(":Retry", THEME.muted_style()),
            ])
        } else {
            Line::from(vec![
                Span::styled(" \u{2191}\u{2193}", THEME.accent_style()),
                Span::styled(":Move  ", THEME.muted_style()),
                Span::styled("Enter", THEME.accent_style()),
                Span::styled(":Open  ", THEME.muted_style()),
                Span::styled("f/t", THEME.accent_style()),
                Span::styled(":From/To  ", THEME.muted_style()),
                Span::styled("/", THEME.accent_style()),
                Span::styled(":Go to  ", THEME.muted_style()),
                Span::styled("?", THEME.accent_style()),
                Span::styled(":Help  ", THEME.muted_style()),
                Span::styled("q", THEME.accent_style()),
                Span::styled(":Quit", THEME.muted_style()),
            ])
        };

        let left = Paragraph::new(left_content).style(THEME.header_style());
        frame.render_widget(left, chunks[0]);

        let right_content = if self.pending > 0 {
            Span::styled(format!("Loading {}... ", self.pending), THEME.accent_style())
        } else {
            Span::styled("Idle ", THEME.muted_style())
        };
        let right = Paragraph::new(right_content)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(right, chunks[1]);
    }
}
