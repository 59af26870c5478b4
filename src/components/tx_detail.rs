use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::{Component, Screen, failure_line, loading_line};
use crate::data::DataService;
use crate::data::error::LoadError;
use crate::data::types::TransactionDetail;
use crate::events::AppEvent;
use crate::loader::{EntityLoader, LoadState};
use crate::theme::THEME;
use crate::utils;

pub struct TxDetailView {
    service: DataService,
    loader: EntityLoader<TransactionDetail>,
}

impl TxDetailView {
    pub fn mount(hash: String, service: DataService) -> Self {
        let loader = EntityLoader::mount(hash, &service);
        Self { service, loader }
    }

    pub fn hash(&self) -> &str {
        self.loader.id()
    }

    pub fn detail(&self) -> Option<&TransactionDetail> {
        self.loader.payload()
    }

    #[cfg(test)]
    pub async fn settled(&mut self) {
        self.loader.settled().await;
    }

    fn build_lines(detail: &TransactionDetail) -> Vec<Line<'static>> {
        let to = match &detail.to {
            Some(addr) => Span::styled(addr.clone(), THEME.address_style()),
            None => Span::styled("Contract creation", THEME.muted_style()),
        };

        vec![
            Line::from(vec![
                Span::styled("  From           ", THEME.muted_style()),
                Span::styled(detail.from.clone(), THEME.address_style()),
                Span::styled("  [f]", THEME.accent_style()),
            ]),
            Line::from(vec![
                Span::styled("  To             ", THEME.muted_style()),
                to,
                Span::styled(
                    if detail.to.is_some() { "  [t]" } else { "" },
                    THEME.accent_style(),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Value          ", THEME.muted_style()),
                Span::styled(utils::format_ether(detail.value), THEME.value_style()),
                Span::styled(" ETH", THEME.muted_style()),
            ]),
            Line::from(vec![
                Span::styled("  Gas Limit      ", THEME.muted_style()),
                Span::raw(utils::format_number(detail.gas_limit)),
            ]),
            Line::from(vec![
                Span::styled("  Gas Price      ", THEME.muted_style()),
                Span::raw(utils::format_gwei(detail.gas_price)),
            ]),
            Line::from(vec![
                Span::styled("  Confirmations  ", THEME.muted_style()),
                Span::raw(utils::format_number(detail.confirmations)),
            ]),
        ]
    }
}

impl Component for TxDetailView {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Char('f') => self
                .detail()
                .map(|d| AppEvent::SelectAccount(d.from.clone())),
            KeyCode::Char('t') => self
                .detail()
                .and_then(|d| d.to.clone())
                .map(AppEvent::SelectAccount),
            KeyCode::Char('r') => {
                self.loader.retry(&self.service);
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let outer_block = Block::default()
            .title(" Transaction ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());

        let mut lines = vec![
            Line::from(vec![
                Span::styled("  Hash           ", THEME.muted_style()),
                Span::styled(self.hash().to_string(), THEME.hash_style()),
            ]),
            Line::from(""),
        ];

        match self.loader.state() {
            LoadState::Pending => {
                lines.push(loading_line("  Loading transaction...".to_string()));
            }
            LoadState::Loaded(detail) => lines.extend(Self::build_lines(detail)),
            LoadState::Failed(err) => lines.push(failure_line(err)),
        }

        let paragraph = Paragraph::new(lines)
            .block(outer_block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

impl Screen for TxDetailView {
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

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::components::key;
    use crate::data::fake::{self, Call, FakeChain};

    #[tokio::test]
    async fn test_detail_links_to_accounts() {
        let chain = Arc::new(
            FakeChain::new().with_transaction(fake::transaction("0x1", "0xA", Some("0xB"))),
        );
        let service = DataService::detached(chain.clone(), Duration::from_secs(5));

        let mut view = TxDetailView::mount("0x1".to_string(), service);
        assert_eq!(view.handle_key(key(KeyCode::Char('f'))), None);
        view.settled().await;

        let detail = view.detail().unwrap();
        assert_eq!(detail.gas_limit, 21_000);
        assert_eq!(utils::format_ether(detail.value), "1.0");

        assert_eq!(
            view.handle_key(key(KeyCode::Char('f'))),
            Some(AppEvent::SelectAccount("0xA".to_string()))
        );
        assert_eq!(
            view.handle_key(key(KeyCode::Char('t'))),
            Some(AppEvent::SelectAccount("0xB".to_string()))
        );
        assert_eq!(chain.calls(Call::Transaction), 1);
    }

    #[tokio::test]
    async fn test_contract_creation_has_no_to() {
        let chain =
            Arc::new(FakeChain::new().with_transaction(fake::transaction("0x2", "0xA", None)));
        let service = DataService::detached(chain.clone(), Duration::from_secs(5));

        let mut view = TxDetailView::mount("0x2".to_string(), service);
        view.settled().await;
        assert_eq!(view.handle_key(key(KeyCode::Char('t'))), None);
    }

    #[tokio::test]
    async fn test_unknown_hash_fails() {
        let chain = Arc::new(FakeChain::new());
        let service = DataService::detached(chain.clone(), Duration::from_secs(5));

        let mut view = TxDetailView::mount("0xdead".to_string(), service);
        view.settled().await;
        assert!(view.error().is_some());
        assert_eq!(view.pending(), 0);
    }
}
