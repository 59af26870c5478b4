use std::time::Duration;

use thiserror::Error;

/// Failure reported by a [`ChainProvider`](crate::data::provider::ChainProvider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("invalid {kind}: {value}")]
    InvalidIdentity { kind: &'static str, value: String },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("rpc error: {0}")]
    Rpc(String),
}

/// Why a loader ended up in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("request timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),

    #[error("request ended without a result")]
    Interrupted,
}
