//! JSON-RPC chain client
//!
//! Transactions are built by hand rather than through provider fillers:
//! estimated gas limit, live legacy gas price, pending-inclusive nonce and
//! the configured chain id. Each submission waits for its receipt before
//! returning, so a wallet never has two transactions in flight and the
//! pending nonce is always current.

use super::{abi, ChainClient, ContractCall, TransactionSimulator, TxOutcome};
use crate::config::RpcConfig;
use crate::wallet::SecureWallet;
use crate::{Error, Result};
use alloy::network::{ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use tracing::{debug, info};

fn rpc_error(context: &str, e: impl std::fmt::Display) -> Error {
    Error::Rpc(format!("{}: {}", context, e))
}

/// Chain client backed by an HTTP JSON-RPC provider
pub struct RpcChainClient {
    provider: DynProvider,
    chain_id: u64,
    dry_run: bool,
}

impl RpcChainClient {
    /// Connect to the configured endpoint
    pub fn connect(rpc: &RpcConfig) -> Result<Self> {
        let url = rpc.parsed_url()?;
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(url)
            .erased();

        Ok(Self {
            provider,
            chain_id: rpc.chain_id,
            dry_run: false,
        })
    }

    /// Simulate writes with `eth_call` instead of broadcasting them
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Check that the endpoint serves the configured chain
    pub async fn verify_chain_id(&self) -> Result<()> {
        let remote = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| rpc_error("eth_chainId", e))?;
        if remote != self.chain_id {
            return Err(Error::Config(format!(
                "RPC endpoint reports chain {}, configured chain is {}",
                remote, self.chain_id
            )));
        }
        Ok(())
    }

    async fn read_uint(&self, to: Address, data: Bytes) -> Result<U256> {
        let tx = TransactionRequest::default().to(to).input(data.into());
        let result = self
            .provider
            .call(tx)
            .await
            .map_err(|e| rpc_error("eth_call", e))?;
        abi::decode_uint(&result)
    }

    async fn simulate(&self, request: TransactionRequest, label: &str) -> Result<TxOutcome> {
        let result = TransactionSimulator::new(&self.provider)
            .simulate(request)
            .await;
        if !result.success {
            return Err(Error::Simulation(
                result
                    .revert_reason
                    .unwrap_or_else(|| "unknown revert".to_string()),
            ));
        }

        let gas_used = result.gas_used.unwrap_or_default();
        info!(label, gas_used, "Dry run: transaction simulated, not broadcast");
        Ok(TxOutcome {
            tx_hash: None,
            gas_used,
            block_number: None,
            simulated: true,
        })
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        self.read_uint(token, abi::allowance_calldata(owner, spender))
            .await
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        self.read_uint(token, abi::balance_of_calldata(owner)).await
    }

    async fn submit(&self, wallet: &SecureWallet, call: ContractCall) -> Result<TxOutcome> {
        let from = wallet.address();
        let request = TransactionRequest::default()
            .from(from)
            .to(call.to)
            .input(call.data.into());

        if self.dry_run {
            return self.simulate(request, call.label).await;
        }

        let gas_limit = self
            .provider
            .estimate_gas(request.clone())
            .await
            .map_err(|e| rpc_error("eth_estimateGas", e))?;
        let gas_price = self
            .provider
            .get_gas_price()
            .await
            .map_err(|e| rpc_error("eth_gasPrice", e))?;
        let nonce = self
            .provider
            .get_transaction_count(from)
            .pending()
            .await
            .map_err(|e| rpc_error("eth_getTransactionCount", e))?;

        debug!(
            label = call.label,
            gas_limit,
            gas_price,
            nonce,
            chain_id = self.chain_id,
            "Signing transaction"
        );

        let envelope = request
            .with_gas_limit(gas_limit)
            .with_gas_price(gas_price)
            .with_nonce(nonce)
            .with_chain_id(self.chain_id)
            .build(wallet.wallet())
            .await
            .map_err(|e| Error::Wallet(format!("Signing failed: {}", e)))?;

        let pending = self
            .provider
            .send_tx_envelope(envelope)
            .await
            .map_err(|e| rpc_error("eth_sendRawTransaction", e))?;
        let tx_hash = *pending.tx_hash();
        info!(label = call.label, %tx_hash, "Transaction broadcast, waiting for receipt");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| rpc_error("receipt", e))?;

        if !receipt.status() {
            return Err(Error::Reverted {
                tx_hash: tx_hash.to_string(),
            });
        }

        Ok(TxOutcome {
            tx_hash: Some(receipt.transaction_hash()),
            gas_used: receipt.gas_used(),
            block_number: receipt.block_number(),
            simulated: false,
        })
    }
}
