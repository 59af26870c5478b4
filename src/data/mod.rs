pub mod error;
#[cfg(test)]
pub mod fake;
pub mod provider;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use crate::data::error::LoadError;
use crate::data::provider::ChainProvider;
use crate::events::AppEvent;
use crate::loader::{Entity, InFlight};

/// Runs entity fetches against the injected provider and wakes the UI when they settle.
#[derive(Clone)]
pub struct DataService {
    provider: Arc<dyn ChainProvider>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    fetch_timeout: Duration,
}

impl DataService {
    pub fn new(
        provider: Arc<dyn ChainProvider>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            event_tx,
            fetch_timeout,
        }
    }

    /// A service whose wake-ups go nowhere. Loaders still work through `settled`/`poll`.
    #[cfg(test)]
    pub fn detached(provider: Arc<dyn ChainProvider>, fetch_timeout: Duration) -> Self {
        let (event_tx, _) = mpsc::unbounded_channel();
        Self::new(provider, event_tx, fetch_timeout)
    }

    pub fn endpoint(&self) -> &str {
        self.provider.endpoint()
    }

    /// Spawn `E::fetch(id)` bounded by the fetch timeout.
    ///
    /// The outcome is delivered on the returned handle; dropping the handle
    /// aborts the task.
    pub fn spawn_fetch<E: Entity>(&self, id: E::Id) -> InFlight<E> {
        let provider = Arc::clone(&self.provider);
        let events = self.event_tx.clone();
        let limit = self.fetch_timeout;
        let (tx, rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            let outcome = match tokio::time::timeout(limit, E::fetch(provider.as_ref(), id)).await
            {
                Ok(Ok(payload)) => Ok(payload),
                Ok(Err(e)) => Err(LoadError::Provider(e)),
                Err(_) => Err(LoadError::TimedOut(limit)),
            };
            // Receiver gone means the loader was dropped; nothing to apply
            if tx.send(outcome).is_ok() {
                let _ = events.send(AppEvent::FetchSettled);
            }
        });

        InFlight::new(rx, task.abort_handle())
    }
}
