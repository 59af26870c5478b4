use tracing::info;

/// The single entity under inspection, or none (latest blocks).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    None,
    Account(String),
    Transaction(String),
}

/// Which screen a focus value renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    LatestBlocks,
    Account,
    Transaction,
}

impl Focus {
    pub fn screen(&self) -> ScreenKind {
        match self {
            Focus::None => ScreenKind::LatestBlocks,
            Focus::Account(_) => ScreenKind::Account,
            Focus::Transaction(_) => ScreenKind::Transaction,
        }
    }
}

/// Owns the navigation focus. Each operation returns whether the focus
/// actually changed, which is the caller's cue to mount a new screen.
#[derive(Debug, Default)]
pub struct ViewRouter {
    focus: Focus,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    /// Whether the "back to latest blocks" control is shown.
    pub fn can_reset(&self) -> bool {
        self.focus != Focus::None
    }

    pub fn select_account(&mut self, address: impl Into<String>) -> bool {
        self.set(Focus::Account(address.into()))
    }

    pub fn select_transaction(&mut self, hash: impl Into<String>) -> bool {
        self.set(Focus::Transaction(hash.into()))
    }

    /// Back to latest blocks. No-op when already there.
    pub fn reset(&mut self) -> bool {
        self.set(Focus::None)
    }

    fn set(&mut self, focus: Focus) -> bool {
        if self.focus == focus {
            return false;
        }
        info!(from = ?self.focus, to = ?focus, "focus changed");
        self.focus = focus;
        true
    }
}
