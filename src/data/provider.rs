use alloy::consensus::Transaction as ConsensusTransaction;
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::BlockNumberOrTag;
use async_trait::async_trait;
use color_eyre::eyre::Result;

use crate::data::error::ProviderError;
use crate::data::types::{BlockWithTransactions, TransactionDetail, TransactionSummary};

/// Read-only chain capability the explorer is built on.
///
/// Identities are passed through as the user selected them; implementations
/// are responsible for rejecting malformed ones.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    async fn block_number(&self) -> Result<u64, ProviderError>;

    async fn block_with_transactions(
        &self,
        number: u64,
    ) -> Result<BlockWithTransactions, ProviderError>;

    async fn transaction(&self, hash: &str) -> Result<TransactionDetail, ProviderError>;

    /// Balance in wei at the latest block.
    async fn balance(&self, address: &str) -> Result<U256, ProviderError>;

    /// Endpoint display name
    fn endpoint(&self) -> &str;
}

/// JSON-RPC provider over HTTP.
pub struct EthProvider {
    provider: Box<dyn Provider + Send + Sync>,
    endpoint: String,
}

impl EthProvider {
    /// Build the HTTP transport. No request is made until the first fetch.
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url = rpc_url.parse()?;
        let provider = ProviderBuilder::new().on_http(url);
        Ok(Self {
            provider: Box::new(provider),
            endpoint: rpc_url.to_string(),
        })
    }
}

#[async_trait]
impl ChainProvider for EthProvider {
    async fn block_number(&self) -> Result<u64, ProviderError> {
        self.provider.get_block_number().await.map_err(rpc_error)
    }

    async fn block_with_transactions(
        &self,
        number: u64,
    ) -> Result<BlockWithTransactions, ProviderError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .full()
            .await
            .map_err(rpc_error)?
            .ok_or_else(|| ProviderError::NotFound {
                kind: "block",
                id: number.to_string(),
            })?;
        let head = self.provider.get_block_number().await.map_err(rpc_error)?;
        let confirmations = confirmations(head, Some(block.header.number));

        let transactions = block
            .transactions
            .as_transactions()
            .map(|txs| {
                txs.iter()
                    .map(|t| TransactionSummary {
                        hash: t.inner.tx_hash().to_string(),
                        from: t.inner.signer().to_string(),
                        to: t.inner.to().map(|a| a.to_string()),
                        confirmations,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(BlockWithTransactions {
            number: block.header.number,
            hash: block.header.hash.to_string(),
            timestamp: block.header.timestamp,
            transactions,
        })
    }

    async fn transaction(&self, hash: &str) -> Result<TransactionDetail, ProviderError> {
        let parsed: B256 = hash
            .trim()
            .parse()
            .map_err(|_| ProviderError::InvalidIdentity {
                kind: "transaction hash",
                value: hash.to_string(),
            })?;

        let tx = self
            .provider
            .get_transaction_by_hash(parsed)
            .await
            .map_err(rpc_error)?
            .ok_or_else(|| ProviderError::NotFound {
                kind: "transaction",
                id: hash.to_string(),
            })?;

        // Pending transactions have no confirmations, skip the head lookup
        let head = match tx.block_number {
            Some(_) => self.provider.get_block_number().await.map_err(rpc_error)?,
            None => 0,
        };

        Ok(TransactionDetail {
            hash: tx.inner.tx_hash().to_string(),
            from: tx.inner.signer().to_string(),
            to: tx.inner.to().map(|a| a.to_string()),
            value: tx.inner.value(),
            gas_limit: tx.inner.gas_limit(),
            gas_price: tx
                .inner
                .gas_price()
                .unwrap_or_else(|| tx.inner.max_fee_per_gas()),
            confirmations: confirmations(head, tx.block_number),
        })
    }

    async fn balance(&self, address: &str) -> Result<U256, ProviderError> {
        let parsed: Address =
            address
                .trim()
                .parse()
                .map_err(|_| ProviderError::InvalidIdentity {
                    kind: "address",
                    value: address.to_string(),
                })?;
        self.provider.get_balance(parsed).await.map_err(rpc_error)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn rpc_error(err: impl std::fmt::Display) -> ProviderError {
    ProviderError::Rpc(err.to_string())
}

/// Blocks mined on top of `mined_in`, counting that block itself.
pub fn confirmations(head: u64, mined_in: Option<u64>) -> u64 {
    match mined_in {
        Some(number) => head.saturating_sub(number) + 1,
        None => 0,
    }
}
