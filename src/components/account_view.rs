use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::{Component, Screen, failure_line, loading_line};
use crate::data::DataService;
use crate::data::error::LoadError;
use crate::data::types::AccountBalance;
use crate::events::AppEvent;
use crate::loader::{EntityLoader, LoadState};
use crate::theme::THEME;
use crate::utils;

pub struct AccountView {
    service: DataService,
    loader: EntityLoader<AccountBalance>,
}

impl AccountView {
    pub fn mount(address: String, service: DataService) -> Self {
        let loader = EntityLoader::mount(address, &service);
        Self { service, loader }
    }

    pub fn address(&self) -> &str {
        self.loader.id()
    }

    /// Balance in ether, once loaded
    pub fn balance_text(&self) -> Option<String> {
        self.loader
            .payload()
            .map(|account| utils::format_ether(account.balance))
    }

    #[cfg(test)]
    pub async fn settled(&mut self) {
        self.loader.settled().await;
    }
}

impl Component for AccountView {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        if let KeyCode::Char('r') = key.code {
            self.loader.retry(&self.service);
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let outer_block = Block::default()
            .title(" Account ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());

        let mut lines = vec![
            Line::from(vec![
                Span::styled("  Address  ", THEME.muted_style()),
                Span::styled(self.address().to_string(), THEME.address_style()),
            ]),
            Line::from(""),
        ];

        match self.loader.state() {
            LoadState::Pending => lines.push(loading_line("  Loading balance...".to_string())),
            LoadState::Loaded(account) => {
                lines.push(Line::from(vec![
                    Span::styled("  Balance  ", THEME.muted_style()),
                    Span::styled(self.balance_text().unwrap_or_default(), THEME.value_style()),
                    Span::styled(" ETH", THEME.muted_style()),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("  Wei      ", THEME.muted_style()),
                    Span::styled(account.balance.to_string(), THEME.muted_style()),
                ]));
            }
            LoadState::Failed(err) => lines.push(failure_line(err)),
        }

        let paragraph = Paragraph::new(lines)
            .block(outer_block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

impl Screen for AccountView {
    fn poll(&mut self) -> bool {
        self.loader.poll()
    }

    fn pending(&self) -> usize {
        usize::from(self.loader.is_pending())
    }

    fn error(&self) -> Option<&LoadError> {
        match self.loader.state() {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}
