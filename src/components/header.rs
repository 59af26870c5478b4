use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::router::{Focus, ViewRouter};
use crate::theme::THEME;
use crate::utils;

pub struct Header {
    pub endpoint: String,
}

impl Header {
    pub fn new(endpoint: String) -> Self {
        Self { endpoint }
    }

    /// Breadcrumb for the current focus
    pub fn breadcrumb(focus: &Focus) -> String {
        match focus {
            Focus::None => "Latest Blocks".to_string(),
            Focus::Account(address) => format!("Account {}", utils::truncate_hex(address)),
            Focus::Transaction(hash) => format!("Transaction {}", utils::truncate_hex(hash)),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, router: &ViewRouter) {
        let focus = router.focus();
        let header_block = Block::default().style(THEME.header_style());
        frame.render_widget(header_block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(18),
                Constraint::Min(0),
                Constraint::Length(40),
            ])
            .split(area);

        let title = Paragraph::new(Span::styled(
            " chain-explorer",
            Style::default()
                .fg(THEME.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .style(THEME.header_style());
        frame.render_widget(title, chunks[0]);

        // The back control only exists while something is focused
        let mut crumbs = vec![Span::styled(Self::breadcrumb(focus), THEME.title_style())];
        if router.can_reset() {
            crumbs.push(Span::styled("   [Esc] ", THEME.accent_style()));
            crumbs.push(Span::styled("Back to latest blocks", THEME.muted_style()));
        }
        let crumbs = Paragraph::new(Line::from(crumbs)).style(THEME.header_style());
        frame.render_widget(crumbs, chunks[1]);

        let endpoint = Paragraph::new(Span::styled(
            format!("{} ", self.endpoint),
            THEME.muted_style(),
        ))
        .alignment(Alignment::Right)
        .style(THEME.header_style());
        frame.render_widget(endpoint, chunks[2]);
    }
}
