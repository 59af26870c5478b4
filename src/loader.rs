//! Per-entity fetch lifecycle.
//!
//! Every card or screen that shows chain data owns one [`EntityLoader`] per
//! entity it displays. A loader issues exactly one fetch when mounted, commits
//! its outcome once and never fetches again unless the user retries a failure.
//! Dropping the loader aborts the fetch, so a result can only ever land in the
//! loader that asked for it.

use std::fmt::Debug;

use async_trait::async_trait;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::data::DataService;
use crate::data::error::{LoadError, ProviderError};
use crate::data::provider::ChainProvider;
use crate::data::types::{AccountBalance, BlockWithTransactions, ChainHead, TransactionDetail};

/// Something a loader can fetch by identity.
#[async_trait]
pub trait Entity: Sized + Send + 'static {
    type Id: Clone + Debug + PartialEq + Send + Sync + 'static;

    /// Short name used in logs
    const KIND: &'static str;

    async fn fetch(provider: &dyn ChainProvider, id: Self::Id) -> Result<Self, ProviderError>;
}

#[async_trait]
impl Entity for ChainHead {
    type Id = ();
    const KIND: &'static str = "head";

    async fn fetch(provider: &dyn ChainProvider, _id: ()) -> Result<Self, ProviderError> {
        provider.block_number().await.map(ChainHead)
    }
}

#[async_trait]
impl Entity for BlockWithTransactions {
    type Id = u64;
    const KIND: &'static str = "block";

    async fn fetch(provider: &dyn ChainProvider, id: u64) -> Result<Self, ProviderError> {
        provider.block_with_transactions(id).await
    }
}

#[async_trait]
impl Entity for TransactionDetail {
    type Id = String;
    const KIND: &'static str = "transaction";

    async fn fetch(provider: &dyn ChainProvider, id: String) -> Result<Self, ProviderError> {
        provider.transaction(&id).await
    }
}

#[async_trait]
impl Entity for AccountBalance {
    type Id = String;
    const KIND: &'static str = "account";

    async fn fetch(provider: &dyn ChainProvider, id: String) -> Result<Self, ProviderError> {
        let balance = provider.balance(&id).await?;
        Ok(AccountBalance {
            address: id,
            balance,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Pending,
    Loaded(T),
    Failed(LoadError),
}

impl<T> LoadState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }
}

/// A fetch running on the runtime. Aborts the task when dropped.
pub struct InFlight<E> {
    rx: oneshot::Receiver<Result<E, LoadError>>,
    task: AbortHandle,
}

impl<E> InFlight<E> {
    pub fn new(rx: oneshot::Receiver<Result<E, LoadError>>, task: AbortHandle) -> Self {
        Self { rx, task }
    }
}

impl<E> Drop for InFlight<E> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct EntityLoader<E: Entity> {
    id: E::Id,
    state: LoadState<E>,
    in_flight: Option<InFlight<E>>,
}

impl<E: Entity> EntityLoader<E> {
    /// Create the loader and start its one fetch.
    pub fn mount(id: E::Id, service: &DataService) -> Self {
        let mut loader = Self {
            id,
            state: LoadState::Pending,
            in_flight: None,
        };
        loader.start(service);
        loader
    }

    fn start(&mut self, service: &DataService) {
        if !self.state.is_pending() || self.in_flight.is_some() {
            return;
        }
        debug!(kind = E::KIND, id = ?self.id, "fetch started");
        self.in_flight = Some(service.spawn_fetch::<E>(self.id.clone()));
    }

    pub fn id(&self) -> &E::Id {
        &self.id
    }

    pub fn state(&self) -> &LoadState<E> {
        &self.state
    }

    pub fn payload(&self) -> Option<&E> {
        match &self.state {
            LoadState::Loaded(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Commit the fetch outcome if it has arrived. Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(flight) = self.in_flight.as_mut() else {
            return false;
        };
        let outcome = match flight.rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(LoadError::Interrupted),
        };
        self.in_flight = None;
        self.commit(outcome);
        true
    }

    /// Wait for the in-flight fetch, if any, and commit its outcome.
    #[cfg(test)]
    pub async fn settled(&mut self) {
        let Some(flight) = self.in_flight.as_mut() else {
            return;
        };
        let outcome = (&mut flight.rx)
            .await
            .unwrap_or(Err(LoadError::Interrupted));
        self.in_flight = None;
        self.commit(outcome);
    }

    /// Go back to `Pending` and fetch again. Only valid after a failure.
    pub fn retry(&mut self, service: &DataService) -> bool {
        if !matches!(self.state, LoadState::Failed(_)) {
            return false;
        }
        info!(kind = E::KIND, id = ?self.id, "retrying fetch");
        self.state = LoadState::Pending;
        self.start(service);
        true
    }

    fn commit(&mut self, outcome: Result<E, LoadError>) {
        if !self.state.is_pending() {
            return;
        }
        self.state = match outcome {
            Ok(payload) => {
                debug!(kind = E::KIND, id = ?self.id, "fetch loaded");
                LoadState::Loaded(payload)
            }
            Err(err) => {
                warn!(kind = E::KIND, id = ?self.id, error = %err, "fetch failed");
                LoadState::Failed(err)
            }
        };
    }
}

impl<E: Entity> Drop for EntityLoader<E> {
    fn drop(&mut self) {
        if self.in_flight.is_some() {
            debug!(kind = E::KIND, id = ?self.id, "fetch cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use alloy::primitives::U256;

    use super::*;
    use crate::data::fake::{Call, FakeChain};

    fn service(chain: &Arc<FakeChain>) -> DataService {
        DataService::detached(chain.clone(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_mount_fetches_once() {
        let chain = Arc::new(FakeChain::new().with_balance("0xA", 7));
        let service = service(&chain);

        let mut loader = EntityLoader::<AccountBalance>::mount("0xA".to_string(), &service);
        assert!(loader.is_pending());
        loader.settled().await;

        for _ in 0..5 {
            assert!(!loader.poll());
        }

        assert_eq!(chain.calls(Call::Balance), 1);
        let payload = loader.payload().unwrap();
        assert_eq!(payload.address, "0xA");
        assert_eq!(payload.balance, U256::from(7));
    }

    #[tokio::test]
    async fn test_poll_commits_once_settled() {
        let chain = Arc::new(FakeChain::new().with_head(42));
        let service = service(&chain);

        let mut loader = EntityLoader::<ChainHead>::mount((), &service);
        let mut changed = false;
        for _ in 0..100 {
            if loader.poll() {
                changed = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert!(changed);
        assert_eq!(loader.state(), &LoadState::Loaded(ChainHead(42)));
        assert!(!loader.poll());
    }

    #[tokio::test]
    async fn test_provider_error_becomes_failed() {
        let chain = Arc::new(FakeChain::new());
        let service = service(&chain);

        let mut loader = EntityLoader::<BlockWithTransactions>::mount(9, &service);
        loader.settled().await;

        match loader.state() {
            LoadState::Failed(LoadError::Provider(ProviderError::NotFound { kind, id })) => {
                assert_eq!(*kind, "block");
                assert_eq!(id, "9");
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_hung_fetch_times_out() {
        let chain = Arc::new(FakeChain::new().hanging());
        let service = DataService::detached(chain.clone(), Duration::from_millis(20));

        let mut loader = EntityLoader::<ChainHead>::mount((), &service);
        loader.settled().await;

        assert_eq!(
            loader.state(),
            &LoadState::Failed(LoadError::TimedOut(Duration::from_millis(20)))
        );
    }

    #[tokio::test]
    async fn test_retry_only_after_failure() {
        let chain = Arc::new(FakeChain::new());
        let service = service(&chain);

        let mut loader = EntityLoader::<TransactionDetail>::mount("0x1".to_string(), &service);
        assert!(!loader.retry(&service));
        loader.settled().await;
        assert!(matches!(loader.state(), LoadState::Failed(_)));
        assert_eq!(chain.calls(Call::Transaction), 1);

        chain.insert_transaction(crate::data::fake::transaction("0x1", "0xA", Some("0xB")));
        assert!(loader.retry(&service));
        assert!(loader.is_pending());
        loader.settled().await;

        assert_eq!(chain.calls(Call::Transaction), 2);
        assert_eq!(loader.payload().unwrap().from, "0xA");
        assert!(!loader.retry(&service));
    }

    #[tokio::test]
    async fn test_drop_aborts_fetch() {
        let chain = Arc::new(FakeChain::new().hanging());
        let service = service(&chain);

        let loader = EntityLoader::<AccountBalance>::mount("0xA".to_string(), &service);
        for _ in 0..100 {
            if chain.live_fetches() == 1 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(chain.live_fetches(), 1);

        drop(loader);
        for _ in 0..100 {
            if chain.live_fetches() == 0 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(chain.live_fetches(), 0);
    }
}
