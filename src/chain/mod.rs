//! Blockchain access
//!
//! Everything the trade sequence needs from the chain goes through the
//! [`ChainClient`] trait: two ERC20 reads and one "sign and submit" write.
//! [`RpcChainClient`] is the JSON-RPC implementation.

pub mod abi;
mod rpc;
mod simulator;

pub use rpc::RpcChainClient;
pub use simulator::{SimulationResult, TransactionSimulator};

use crate::wallet::SecureWallet;
use crate::Result;
use alloy::primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use std::sync::Arc;

/// A contract call to be signed and submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    /// Contract address
    pub to: Address,
    /// ABI-encoded calldata
    pub data: Bytes,
    /// Short name for logs ("approve", "swap")
    pub label: &'static str,
}

/// Result of a submitted (or simulated) transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    /// Transaction hash; `None` when the call was only simulated
    pub tx_hash: Option<B256>,
    /// Gas used by the receipt, or the estimate for simulations
    pub gas_used: u64,
    /// Block the transaction was included in
    pub block_number: Option<u64>,
    /// Set when the call went through `eth_call` and changed no chain state
    pub simulated: bool,
}

impl TxOutcome {
    /// Hash for display
    pub fn hash_string(&self) -> String {
        self.tx_hash
            .map(|h| h.to_string())
            .unwrap_or_else(|| "simulated".to_string())
    }
}

/// Chain operations used by the trade sequence
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// ERC20 `allowance(owner, spender)`
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    /// ERC20 `balanceOf(owner)`
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256>;

    /// Sign `call` with `wallet`, broadcast it and wait for inclusion
    async fn submit(&self, wallet: &SecureWallet, call: ContractCall) -> Result<TxOutcome>;
}

#[async_trait]
impl<C: ChainClient + ?Sized> ChainClient for Arc<C> {
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        (**self).allowance(token, owner, spender).await
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        (**self).balance_of(token, owner).await
    }

    async fn submit(&self, wallet: &SecureWallet, call: ContractCall) -> Result<TxOutcome> {
        (**self).submit(wallet, call).await
    }
}
