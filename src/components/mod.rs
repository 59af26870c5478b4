pub mod account_view;
pub mod block_card;
pub mod header;
pub mod help;
pub mod latest_blocks;
pub mod search;
pub mod status_bar;
pub mod tx_detail;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use crate::data::error::LoadError;
use crate::events::AppEvent;
use crate::theme::THEME;

/// Trait for all UI components
pub trait Component {
    /// Handle a key event, optionally returning an AppEvent
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent>;

    /// Render the component into the given area
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A full-screen view that owns loaders.
pub trait Screen: Component {
    /// Commit any settled fetches. Returns true if anything changed.
    fn poll(&mut self) -> bool;

    /// Loaders still waiting on the provider
    fn pending(&self) -> usize;

    /// Most relevant failure on this screen, for the status bar
    fn error(&self) -> Option<&LoadError>;
}

pub(crate) fn loading_line(text: String) -> Line<'static> {
    Line::from(Span::styled(text, THEME.loading_style()))
}

pub(crate) fn failure_line(err: &LoadError) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  ! {err}"), THEME.error_style()),
        Span::styled("  (r to retry)", THEME.muted_style()),
    ])
}

/// Build a synthetic key press for component tests.
#[cfg(test)]
pub(crate) fn key(code: crossterm::event::KeyCode) -> KeyEvent {
    KeyEvent::new(code, crossterm::event::KeyModifiers::NONE)
}
