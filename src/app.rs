use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tokio::sync::mpsc;
use tracing::debug;

use crate::components::account_view::AccountView;
use crate::components::header::Header;
use crate::components::help::HelpOverlay;
use crate::components::latest_blocks::LatestBlocksScreen;
use crate::components::search::SearchBar;
use crate::components::status_bar::StatusBar;
use crate::components::tx_detail::TxDetailView;
use crate::components::{Component, Screen};
use crate::data::DataService;
use crate::events::AppEvent;
use crate::router::{Focus, ScreenKind, ViewRouter};
use crate::theme::THEME;

/// Inputs to the latest-blocks screen
#[derive(Debug, Clone, Copy)]
pub struct WindowSettings {
    pub start_block: Option<u64>,
    pub window: u64,
}

/// The one mounted screen. Replacing it drops every loader it owns.
enum ActiveScreen {
    LatestBlocks(LatestBlocksScreen),
    Account(AccountView),
    Transaction(TxDetailView),
}

impl ActiveScreen {
    fn mount(focus: &Focus, service: &DataService, settings: WindowSettings) -> Self {
        match focus {
            Focus::None => ActiveScreen::LatestBlocks(LatestBlocksScreen::mount(
                service.clone(),
                settings.start_block,
                settings.window,
            )),
            Focus::Account(address) => {
                ActiveScreen::Account(AccountView::mount(address.clone(), service.clone()))
            }
            Focus::Transaction(hash) => {
                ActiveScreen::Transaction(TxDetailView::mount(hash.clone(), service.clone()))
            }
        }
    }

    fn kind(&self) -> ScreenKind {
        match self {
            ActiveScreen::LatestBlocks(_) => ScreenKind::LatestBlocks,
            ActiveScreen::Account(_) => ScreenKind::Account,
            ActiveScreen::Transaction(_) => ScreenKind::Transaction,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            ActiveScreen::LatestBlocks(s) => s,
            ActiveScreen::Account(s) => s,
            ActiveScreen::Transaction(s) => s,
        }
    }
}

pub struct App {
    // Navigation
    router: ViewRouter,
    screen: ActiveScreen,

    // Chrome
    header: Header,
    status_bar: StatusBar,
    search_bar: SearchBar,
    help: HelpOverlay,

    // Data
    data_service: DataService,
    settings: WindowSettings,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,

    // State
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn new(
        data_service: DataService,
        settings: WindowSettings,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        tick_rate_ms: u64,
    ) -> Self {
        let router = ViewRouter::new();
        let screen = ActiveScreen::mount(router.focus(), &data_service, settings);
        Self {
            router,
            screen,
            header: Header::new(data_service.endpoint().to_string()),
            status_bar: StatusBar::new(),
            search_bar: SearchBar::new(),
            help: HelpOverlay::new(),
            data_service,
            settings,
            event_rx,
            should_quit: false,
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub async fn run(&mut self, mut terminal: ratatui::DefaultTerminal) -> color_eyre::Result<()> {
        let mut interval = tokio::time::interval(self.tick_rate);
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    self.poll_screen();
                    terminal.draw(|frame| self.render(frame))?;
                }
                Some(Ok(event)) = events.next() => {
                    self.handle_terminal_event(event);
                }
                Some(app_event) = self.event_rx.recv() => {
                    self.handle_app_event(app_event);
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(
            Block::default().style(Style::default().bg(THEME.bg)),
            area,
        );

        // Layout: header (1) | content (fill) | status bar (1)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.render(frame, chunks[0], &self.router);
        self.screen.as_screen_mut().render(frame, chunks[1]);
        self.status_bar.render(frame, chunks[2]);

        // Overlays (rendered on top)
        self.search_bar.render(frame, area);
        self.help.render(frame, area);
    }

    fn poll_screen(&mut self) {
        let screen = self.screen.as_screen_mut();
        screen.poll();
        self.status_bar.pending = screen.pending();
        self.status_bar.error_message = screen.error().map(|e| e.to_string());
    }

    fn handle_terminal_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only handle key press events (not release/repeat) for cross-platform compat
            if key.kind != KeyEventKind::Press {
                return;
            }
            if let Some(app_event) = self.handle_key(key) {
                self.handle_app_event(app_event);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        // Help overlay consumes all keys when visible
        if self.help.handle_key(key) {
            return None;
        }

        if self.search_bar.active {
            return self.search_bar.handle_key(key).map(|t| t.into_event());
        }

        match key.code {
            KeyCode::Char('q') => return Some(AppEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(AppEvent::Quit);
            }
            KeyCode::Char('/') => {
                self.search_bar.activate();
                return None;
            }
            KeyCode::Char('?') => {
                self.help.toggle();
                return None;
            }
            KeyCode::Esc | KeyCode::Backspace => return Some(AppEvent::Reset),
            _ => {}
        }

        self.screen.as_screen_mut().handle_key(key)
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        let changed = match event {
            AppEvent::SelectAccount(address) => self.router.select_account(address),
            AppEvent::SelectTransaction(hash) => self.router.select_transaction(hash),
            AppEvent::Reset => self.router.reset(),
            AppEvent::FetchSettled => {
                self.poll_screen();
                false
            }
            AppEvent::Quit => {
                self.should_quit = true;
                false
            }
        };

        if changed {
            self.remount();
        }
    }

    fn remount(&mut self) {
        self.screen = ActiveScreen::mount(self.router.focus(), &self.data_service, self.settings);
        debug_assert_eq!(self.screen.kind(), self.router.focus().screen());
        debug!(screen = ?self.screen.kind(), "screen mounted");
        self.poll_screen();
    }

    /// Apply a start-up selection as if the user had made it.
    pub fn dispatch(&mut self, event: AppEvent) {
        self.handle_app_event(event);
    }
}
