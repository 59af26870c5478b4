use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::block_card::BlockCard;
use crate::components::{Component, Screen, failure_line, loading_line};
use crate::data::DataService;
use crate::data::error::LoadError;
use crate::data::types::ChainHead;
use crate::events::AppEvent;
use crate::loader::{EntityLoader, LoadState};
use crate::theme::THEME;

/// Block numbers in the recent window, newest first, never below genesis.
pub fn block_window(head: u64, size: u64) -> Vec<u64> {
    (0..size).map_while(|i| head.checked_sub(i)).collect()
}

enum Head {
    Fixed(u64),
    Live(EntityLoader<ChainHead>),
}

/// A selectable row in the flattened list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Card(usize),
    Tx(usize, usize),
}

pub struct LatestBlocksScreen {
    service: DataService,
    window: u64,
    head: Head,
    cards: Vec<BlockCard>,
    selected: usize,
    list_state: ListState,
}

impl LatestBlocksScreen {
    /// Mount the screen. With a fixed start block the cards mount at once,
    /// otherwise after the head lookup resolves.
    pub fn mount(service: DataService, start_block: Option<u64>, window: u64) -> Self {
        let head = match start_block {
            Some(number) => Head::Fixed(number),
            None => Head::Live(EntityLoader::mount((), &service)),
        };
        let mut screen = Self {
            service,
            window,
            head,
            cards: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
        };
        screen.mount_cards();
        screen
    }

    fn head_number(&self) -> Option<u64> {
        match &self.head {
            Head::Fixed(number) => Some(*number),
            Head::Live(loader) => loader.payload().map(|head| head.0),
        }
    }

    fn mount_cards(&mut self) {
        if !self.cards.is_empty() {
            return;
        }
        let Some(head) = self.head_number() else {
            return;
        };
        self.cards = block_window(head, self.window)
            .into_iter()
            .map(|number| BlockCard::mount(number, &self.service))
            .collect();
    }

    #[cfg(test)]
    pub fn cards(&self) -> &[BlockCard] {
        &self.cards
    }

    #[cfg(test)]
    pub async fn settled(&mut self) {
        let anchor = self.current();
        if let Head::Live(loader) = &mut self.head {
            loader.settled().await;
        }
        self.mount_cards();
        for card in self.cards.iter_mut() {
            card.settled().await;
        }
        self.reanchor(anchor);
    }

    fn entries(&self) -> Vec<Entry> {
        let mut entries = Vec::new();
        for (i, card) in self.cards.iter().enumerate() {
            entries.push(Entry::Card(i));
            entries.extend((0..card.rows().len()).map(|j| Entry::Tx(i, j)));
        }
        entries
    }

    fn current(&self) -> Option<Entry> {
        self.entries().get(self.selected).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.entries().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Put the cursor back on `anchor` after rows appeared or vanished above it.
    /// A row that no longer exists falls back to its card.
    fn reanchor(&mut self, anchor: Option<Entry>) {
        let entries = self.entries();
        let target = match anchor {
            Some(Entry::Tx(i, j)) if !entries.contains(&Entry::Tx(i, j)) => Some(Entry::Card(i)),
            other => other,
        };
        match target.and_then(|t| entries.iter().position(|e| *e == t)) {
            Some(index) => self.selected = index,
            None => self.clamp_selection(),
        }
    }

    fn select_next(&mut self) {
        let len = self.entries().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn activate(&mut self) -> Option<AppEvent> {
        match self.current()? {
            Entry::Card(i) => {
                self.cards[i].toggle();
                self.clamp_selection();
                None
            }
            Entry::Tx(i, j) => Some(self.cards[i].rows()[j].open()),
        }
    }

    fn retry(&mut self) {
        if let Head::Live(loader) = &mut self.head {
            if loader.retry(&self.service) {
                return;
            }
        }
        if let Some(Entry::Card(i)) = self.current() {
            self.cards[i].retry(&self.service);
        }
    }

    fn build_items(&self) -> (Vec<ListItem<'static>>, usize) {
        let mut items = Vec::new();
        let mut highlighted = 0;
        for (index, entry) in self.entries().into_iter().enumerate() {
            let selected = index == self.selected;
            match entry {
                Entry::Card(i) => {
                    let card = &self.cards[i];
                    if selected {
                        highlighted = items.len();
                    }
                    let mut lines = card.header_lines(selected);
                    if let Some(heading) = card.expansion_heading() {
                        lines.push(heading);
                    }
                    items.push(ListItem::new(lines));
                }
                Entry::Tx(i, j) => {
                    if selected {
                        highlighted = items.len();
                    }
                    items.push(ListItem::new(self.cards[i].rows()[j].line(selected)));
                }
            }
        }
        (items, highlighted)
    }
}

impl Component for LatestBlocksScreen {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_prev();
                None
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                None
            }
            KeyCode::Char('G') => {
                self.selected = self.entries().len().saturating_sub(1);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::Char('f') => match self.current()? {
                Entry::Tx(i, j) => Some(self.cards[i].rows()[j].open_from()),
                Entry::Card(_) => None,
            },
            KeyCode::Char('t') => match self.current()? {
                Entry::Tx(i, j) => self.cards[i].rows()[j].open_to(),
                Entry::Card(_) => None,
            },
            KeyCode::Char('r') => {
                self.retry();
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let outer_block = Block::default()
            .title(" Latest Blocks ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());

        if self.cards.is_empty() {
            let line = match &self.head {
                Head::Live(loader) => match loader.state() {
                    LoadState::Failed(err) => failure_line(err),
                    _ => loading_line("  Loading latest block number...".to_string()),
                },
                Head::Fixed(_) => loading_line("  Loading blocks...".to_string()),
            };
            frame.render_widget(Paragraph::new(line).block(outer_block), area);
            return;
        }

        let (items, highlighted) = self.build_items();
        self.list_state.select(Some(highlighted));
        let list = List::new(items).block(outer_block);
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Screen for LatestBlocksScreen {
    fn poll(&mut self) -> bool {
        let anchor = self.current();
        let mut changed = false;
        if let Head::Live(loader) = &mut self.head {
            changed |= loader.poll();
        }
        if changed {
            self.mount_cards();
        }
        for card in self.cards.iter_mut() {
            changed |= card.poll();
        }
        if changed {
            self.reanchor(anchor);
        }
        changed
    }

    fn pending(&self) -> usize {
        let head = match &self.head {
            Head::Live(loader) if loader.is_pending() => 1,
            _ => 0,
        };
        head + self.cards.iter().filter(|c| c.is_pending()).count()
    }

    fn error(&self) -> Option<&LoadError> {
        if let Head::Live(loader) = &self.head {
            if let LoadState::Failed(err) = loader.state() {
                return Some(err);
            }
        }
        if let Some(Entry::Card(i) | Entry::Tx(i, _)) = self.current() {
            if let Some(err) = self.cards[i].error() {
                return Some(err);
            }
        }
        self.cards.iter().find_map(|c| c.error())
    }
}
