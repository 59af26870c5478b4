use alloy::primitives::U256;

/// Current chain head, as reported by `eth_blockNumber`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainHead(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockWithTransactions {
    pub number: u64,
    pub hash: String,
    pub timestamp: u64,
    pub transactions: Vec<TransactionSummary>,
}

impl BlockWithTransactions {
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSummary {
    pub hash: String,
    pub from: String,
    /// `None` for contract creation
    pub to: Option<String>,
    pub confirmations: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetail {
    pub hash: String,
    pub from: String,
    pub to: Option<String>,
    /// Wei
    pub value: U256,
    pub gas_limit: u64,
    /// Wei per gas
    pub gas_price: u128,
    pub confirmations: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBalance {
    pub address: String,
    /// Wei. Only divided down at render time.
    pub balance: U256,
}
