/// Target identified from a go-to query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    Account(String),
    Transaction(String),
}

impl SearchTarget {
    /// Classify by shape only. Anything that is not a 32-byte hash is treated
    /// as an address and left for the provider to accept or reject.
    pub fn parse(input: &str) -> Option<SearchTarget> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if input.starts_with("0x") && input.len() == 66 {
            return Some(SearchTarget::Transaction(input.to_string()));
        }

        Some(SearchTarget::Account(input.to_string()))
    }

    pub fn into_event(self) -> AppEvent {
        match self {
            SearchTarget::Account(address) => AppEvent::SelectAccount(address),
            SearchTarget::Transaction(hash) => AppEvent::SelectTransaction(hash),
        }
    }
}

/// Events raised by components and background fetches for the main loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    // Navigation
    SelectAccount(String),
    SelectTransaction(String),
    Reset,

    /// A loader's fetch finished; the active screen should poll
    FetchSettled,

    Quit,
}
