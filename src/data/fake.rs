//! In-memory chain used by tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use alloy::primitives::U256;
use async_trait::async_trait;

use crate::data::error::ProviderError;
use crate::data::provider::ChainProvider;
use crate::data::types::{BlockWithTransactions, TransactionDetail, TransactionSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    BlockNumber,
    Block,
    Transaction,
    Balance,
}

/// Counts fetch futures currently alive, so tests can observe cancellation.
struct LiveGuard(Arc<AtomicUsize>);

impl LiveGuard {
    fn new(live: &Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(live))
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct FakeChain {
    head: u64,
    blocks: Mutex<HashMap<u64, BlockWithTransactions>>,
    transactions: Mutex<HashMap<String, TransactionDetail>>,
    balances: HashMap<String, U256>,
    hang: bool,
    calls: Mutex<HashMap<Call, usize>>,
    live: Arc<AtomicUsize>,
}

impl FakeChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_head(mut self, head: u64) -> Self {
        self.head = head;
        self
    }

    pub fn with_block(self, block: BlockWithTransactions) -> Self {
        self.insert_block(block);
        self
    }

    pub fn with_balance(mut self, address: &str, wei: u128) -> Self {
        self.balances.insert(address.to_string(), U256::from(wei));
        self
    }

    pub fn with_transaction(self, tx: TransactionDetail) -> Self {
        self.insert_transaction(tx);
        self
    }

    /// Every request stays pending forever.
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn insert_block(&self, block: BlockWithTransactions) {
        self.blocks.lock().unwrap().insert(block.number, block);
    }

    pub fn insert_transaction(&self, tx: TransactionDetail) {
        self.transactions.lock().unwrap().insert(tx.hash.clone(), tx);
    }

    pub fn calls(&self, call: Call) -> usize {
        self.calls.lock().unwrap().get(&call).copied().unwrap_or(0)
    }

    pub fn live_fetches(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    async fn enter(&self, call: Call) -> LiveGuard {
        *self.calls.lock().unwrap().entry(call).or_default() += 1;
        let guard = LiveGuard::new(&self.live);
        if self.hang {
            std::future::pending::<()>().await;
        }
        guard
    }
}

#[async_trait]
impl ChainProvider for FakeChain {
    async fn block_number(&self) -> Result<u64, ProviderError> {
        let _guard = self.enter(Call::BlockNumber).await;
        Ok(self.head)
    }

    async fn block_with_transactions(
        &self,
        number: u64,
    ) -> Result<BlockWithTransactions, ProviderError> {
        let _guard = self.enter(Call::Block).await;
        self.blocks
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                kind: "block",
                id: number.to_string(),
            })
    }

    async fn transaction(&self, hash: &str) -> Result<TransactionDetail, ProviderError> {
        let _guard = self.enter(Call::Transaction).await;
        self.transactions
            .lock()
            .unwrap()
            .get(hash)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                kind: "transaction",
                id: hash.to_string(),
            })
    }

    async fn balance(&self, address: &str) -> Result<U256, ProviderError> {
        let _guard = self.enter(Call::Balance).await;
        if !address.starts_with("0x") {
            return Err(ProviderError::InvalidIdentity {
                kind: "address",
                value: address.to_string(),
            });
        }
        Ok(self.balances.get(address).copied().unwrap_or(U256::ZERO))
    }

    fn endpoint(&self) -> &str {
        "fake://chain"
    }
}

pub fn block(
    number: u64,
    hash: &str,
    timestamp: u64,
    txs: Vec<TransactionSummary>,
) -> BlockWithTransactions {
    BlockWithTransactions {
        number,
        hash: hash.to_string(),
        timestamp,
        transactions: txs,
    }
}

pub fn summary(
    hash: &str,
    from: &str,
    to: Option<&str>,
    confirmations: u64,
) -> TransactionSummary {
    TransactionSummary {
        hash: hash.to_string(),
        from: from.to_string(),
        to: to.map(str::to_string),
        confirmations,
    }
}

pub fn transaction(hash: &str, from: &str, to: Option<&str>) -> TransactionDetail {
    TransactionDetail {
        hash: hash.to_string(),
        from: from.to_string(),
        to: to.map(str::to_string),
        value: U256::from(1_000_000_000_000_000_000u128),
        gas_limit: 21_000,
        gas_price: 2_000_000_000,
        confirmations: 3,
    }
}
