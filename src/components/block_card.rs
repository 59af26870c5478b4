use ratatui::prelude::*;

use crate::components::{failure_line, loading_line};
use crate::data::DataService;
use crate::data::error::LoadError;
use crate::data::types::{BlockWithTransactions, TransactionSummary};
use crate::events::AppEvent;
use crate::loader::{EntityLoader, LoadState};
use crate::theme::THEME;
use crate::utils;

/// One transaction inside an expanded block card. Built from the parent
/// block's payload; never fetches on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    summary: TransactionSummary,
}

impl TransactionRow {
    pub fn new(summary: TransactionSummary) -> Self {
        Self { summary }
    }

    pub fn open(&self) -> AppEvent {
        AppEvent::SelectTransaction(self.summary.hash.clone())
    }

    pub fn open_from(&self) -> AppEvent {
        AppEvent::SelectAccount(self.summary.from.clone())
    }

    /// `None` for contract creation
    pub fn open_to(&self) -> Option<AppEvent> {
        self.summary.to.clone().map(AppEvent::SelectAccount)
    }

    pub fn line(&self, selected: bool) -> Line<'static> {
        let tx = &self.summary;
        let to = tx
            .to
            .as_deref()
            .map(utils::truncate_hex)
            .unwrap_or_else(|| "Contract creation".to_string());
        let line = Line::from(vec![
            Span::raw("      "),
            Span::styled(utils::truncate_hex(&tx.hash), THEME.hash_style()),
            Span::styled("  from ", THEME.muted_style()),
            Span::styled(utils::truncate_hex(&tx.from), THEME.address_style()),
            Span::styled("  to ", THEME.muted_style()),
            Span::styled(to, THEME.address_style()),
            Span::styled(
                format!("  ({} confirmations)", utils::format_number(tx.confirmations)),
                THEME.muted_style(),
            ),
        ]);
        if selected {
            line.style(THEME.selected_style())
        } else {
            line
        }
    }
}

pub fn block_title(block: &BlockWithTransactions) -> String {
    format!("Block {} - {}", block.number, block.hash)
}

pub fn block_subtitle(block: &BlockWithTransactions) -> String {
    format!(
        "Transactions: {}, Timestamp: {}",
        block.tx_count(),
        block.timestamp
    )
}

/// A block in the recent window: summary fetched on mount, transactions
/// listed only while expanded.
pub struct BlockCard {
    loader: EntityLoader<BlockWithTransactions>,
    expanded: bool,
    rows: Option<Vec<TransactionRow>>,
}

impl BlockCard {
    pub fn mount(number: u64, service: &DataService) -> Self {
        Self {
            loader: EntityLoader::mount(number, service),
            expanded: false,
            rows: None,
        }
    }

    pub fn number(&self) -> u64 {
        *self.loader.id()
    }

    pub fn state(&self) -> &LoadState<BlockWithTransactions> {
        self.loader.state()
    }

    pub fn is_pending(&self) -> bool {
        self.loader.is_pending()
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self.loader.state() {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Transaction rows, empty while collapsed or still loading
    pub fn rows(&self) -> &[TransactionRow] {
        self.rows.as_deref().unwrap_or(&[])
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
        if self.expanded {
            self.instantiate_rows();
        } else {
            self.rows = None;
        }
    }

    fn instantiate_rows(&mut self) {
        self.rows = self.loader.payload().map(|block| {
            block
                .transactions
                .iter()
                .cloned()
                .map(TransactionRow::new)
                .collect()
        });
    }

    pub fn poll(&mut self) -> bool {
        let changed = self.loader.poll();
        if changed {
            self.on_settled();
        }
        changed
    }

    #[cfg(test)]
    pub async fn settled(&mut self) {
        self.loader.settled().await;
        self.on_settled();
    }

    fn on_settled(&mut self) {
        if self.expanded && self.rows.is_none() {
            self.instantiate_rows();
        }
    }

    pub fn retry(&mut self, service: &DataService) -> bool {
        self.loader.retry(service)
    }

    /// Card header lines (always two high)
    pub fn header_lines(&self, selected: bool) -> Vec<Line<'static>> {
        let marker = if self.expanded { "\u{25be} " } else { "\u{25b8} " };
        let mut lines = match self.state() {
            LoadState::Pending => vec![
                loading_line(format!("  {marker}Loading block {}...", self.number())),
                Line::from(""),
            ],
            LoadState::Loaded(block) => vec![
                Line::from(vec![
                    Span::styled(format!("  {marker}"), THEME.accent_style()),
                    Span::styled(block_title(block), THEME.title_style()),
                ]),
                Line::from(Span::styled(
                    format!("    {}", block_subtitle(block)),
                    THEME.muted_style(),
                )),
            ],
            LoadState::Failed(err) => vec![
                Line::from(Span::styled(
                    format!("  {marker}Block {}", self.number()),
                    THEME.title_style(),
                )),
                failure_line(err),
            ],
        };
        if selected {
            for line in lines.iter_mut() {
                *line = std::mem::take(line).style(THEME.selected_style());
            }
        }
        lines
    }

    /// Extra line shown above the rows of an expanded card
    pub fn expansion_heading(&self) -> Option<Line<'static>> {
        if !self.is_expanded() {
            return None;
        }
        let text = match self.state() {
            LoadState::Loaded(block) if block.transactions.is_empty() => {
                "    No transactions".to_string()
            }
            LoadState::Loaded(block) => format!(
                "    Transactions (mined {})",
                utils::format_timestamp(block.timestamp)
            ),
            _ => "    Transactions".to_string(),
        };
        Some(Line::from(Span::styled(text, THEME.muted_style())))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::data::fake::{self, Call, FakeChain};

    fn scenario_chain() -> Arc<FakeChain> {
        Arc::new(FakeChain::new().with_head(172414).with_block(fake::block(
            172414,
            "0xabc",
            1000,
            vec![fake::summary("0x1", "0xA", Some("0xB"), 5)],
        )))
    }

    #[tokio::test]
    async fn test_card_shows_block_summary() {
        let chain = scenario_chain();
        let service = DataService::detached(chain.clone(), Duration::from_secs(5));

        let mut card = BlockCard::mount(172414, &service);
        assert!(card.is_pending());
        card.settled().await;

        let LoadState::Loaded(block) = card.state() else {
            panic!("block not loaded");
        };
        assert_eq!(block_title(block), "Block 172414 - 0xabc");
        assert_eq!(block_subtitle(block), "Transactions: 1, Timestamp: 1000");

        assert!(card.rows().is_empty());
        card.toggle();
        assert_eq!(card.rows().len(), 1);
        let row = &card.rows()[0];
        assert_eq!(row.open(), AppEvent::SelectTransaction("0x1".to_string()));
        assert_eq!(row.open_from(), AppEvent::SelectAccount("0xA".to_string()));
        assert_eq!(row.open_to(), Some(AppEvent::SelectAccount("0xB".to_string())));
    }

    #[tokio::test]
    async fn test_toggle_does_not_refetch() {
        let chain = scenario_chain();
        let service = DataService::detached(chain.clone(), Duration::from_secs(5));

        let mut card = BlockCard::mount(172414, &service);
        card.settled().await;

        card.toggle();
        assert!(card.is_expanded());
        assert_eq!(card.rows().len(), 1);

        card.toggle();
        assert!(!card.is_expanded());
        assert!(card.rows().is_empty());

        card.toggle();
        assert_eq!(card.rows().len(), 1);
        assert!(!card.poll());

        assert_eq!(chain.calls(Call::Block), 1);
    }

    #[tokio::test]
    async fn test_rows_appear_when_expanded_before_load() {
        let chain = scenario_chain();
        let service = DataService::detached(chain.clone(), Duration::from_secs(5));

        let mut card = BlockCard::mount(172414, &service);
        card.toggle();
        assert!(card.rows().is_empty());

        card.settled().await;
        assert_eq!(card.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_card_can_retry() {
        let chain = Arc::new(FakeChain::new());
        let service = DataService::detached(chain.clone(), Duration::from_secs(5));

        let mut card = BlockCard::mount(5, &service);
        card.settled().await;
        assert!(card.error().is_some());

        chain.insert_block(fake::block(5, "0x5", 50, vec![]));
        assert!(card.retry(&service));
        card.settled().await;
        assert!(card.error().is_none());
        assert_eq!(chain.calls(Call::Block), 2);
    }

    #[test]
    fn test_contract_creation_has_no_to_link() {
        let row = TransactionRow::new(fake::summary("0x1", "0xA", None, 1));
        assert_eq!(row.open_to(), None);
    }
}
