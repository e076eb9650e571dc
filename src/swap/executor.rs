//! Trade execution: allowance, sizing and swap submission
//!
//! One trade is the fixed sequence
//! allowance check -> approval if needed -> size from balance -> swap.
//!
//! The swap is sent with `amountOutMinimum = 0` and `sqrtPriceLimitX96 = 0`,
//! which disables slippage protection entirely. The target pools are thin
//! testnet pools where any fill is acceptable; do not point this at a chain
//! where the output has value.

use super::pair::{select_pair, TradingPair};
use super::Trader;
use crate::chain::abi::{self, ExactInputSingleParams, ISwapRouter};
use crate::chain::{ChainClient, ContractCall, TxOutcome};
use crate::config::SwapConfig;
use crate::tokens::{format_units, Token};
use crate::wallet::SecureWallet;
use crate::{Error, Result};
use alloy::primitives::aliases::{U160, U24};
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Trade size is balance / TRADE_FRACTION_DIVISOR (5%)
pub const TRADE_FRACTION_DIVISOR: u64 = 20;

/// Display decimals for amounts in logs
const DISPLAY_DECIMALS: u32 = 18;

/// Parameters of one `exactInputSingle` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapParams {
    pub token_in: Address,
    pub token_out: Address,
    pub fee: u32,
    pub recipient: Address,
    /// Unix timestamp after which the router rejects the swap
    pub deadline: u64,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
    pub sqrt_price_limit_x96: U160,
}

impl SwapParams {
    /// ABI-encode as router calldata
    pub fn encode(&self) -> Bytes {
        ISwapRouter::exactInputSingleCall {
            params: ExactInputSingleParams {
                tokenIn: self.token_in,
                tokenOut: self.token_out,
                fee: U24::saturating_from(self.fee),
                recipient: self.recipient,
                deadline: U256::from(self.deadline),
                amountIn: self.amount_in,
                amountOutMinimum: self.amount_out_minimum,
                sqrtPriceLimitX96: self.sqrt_price_limit_x96,
            },
        }
        .abi_encode()
        .into()
    }
}

/// Everything that happened in one successful trade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeReport {
    pub pair: TradingPair,
    pub amount_in: U256,
    /// Present when an approval had to be sent first
    pub approval: Option<TxOutcome>,
    /// `None` when the swap was skipped after a simulated approval
    pub swap: Option<TxOutcome>,
}

/// Runs trades for any wallet against one router
pub struct SwapExecutor<C> {
    chain: C,
    swap: SwapConfig,
}

impl<C: ChainClient> SwapExecutor<C> {
    pub fn new(chain: C, swap: SwapConfig) -> Self {
        Self { chain, swap }
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Make sure the router may spend `token` without limit
    ///
    /// Sends `approve(router, MAX)` only when the current allowance is below
    /// `U256::MAX`; returns `None` when nothing was sent.
    pub async fn ensure_allowance(
        &self,
        wallet: &SecureWallet,
        token: &Token,
    ) -> Result<Option<TxOutcome>> {
        let current = self
            .chain
            .allowance(token.address, wallet.address(), self.swap.router)
            .await?;
        if current == U256::MAX {
            return Ok(None);
        }

        warn!(
            token = %token.symbol,
            "Allowance insufficient, approving unlimited"
        );
        let call = ContractCall {
            to: token.address,
            data: abi::approve_calldata(self.swap.router, U256::MAX),
            label: "approve",
        };
        let outcome = self.chain.submit(wallet, call).await?;
        info!(
            token = %token.symbol,
            tx_hash = %outcome.hash_string(),
            "Approval complete"
        );
        Ok(Some(outcome))
    }

    /// Trade amount for `token`: 5% of the wallet balance, rounded down
    pub async fn size_trade(&self, wallet: &SecureWallet, token: &Token) -> Result<U256> {
        let balance = self.chain.balance_of(token.address, wallet.address()).await?;
        let amount = balance / U256::from(TRADE_FRACTION_DIVISOR);
        if amount.is_zero() {
            return Err(Error::InsufficientBalance {
                symbol: token.symbol.clone(),
            });
        }
        Ok(amount)
    }

    /// Build swap parameters with a deadline relative to `now` (unix seconds)
    pub fn swap_params(
        &self,
        wallet: &SecureWallet,
        pair: &TradingPair,
        amount_in: U256,
        now: u64,
    ) -> SwapParams {
        SwapParams {
            token_in: pair.token_in.address,
            token_out: pair.token_out.address,
            fee: self.swap.pool_fee,
            recipient: wallet.address(),
            deadline: now.saturating_add(self.swap.deadline_secs),
            amount_in,
            amount_out_minimum: U256::ZERO,
            sqrt_price_limit_x96: U160::ZERO,
        }
    }

    /// Submit the swap and wait for it to be mined
    pub async fn submit_swap(
        &self,
        wallet: &SecureWallet,
        pair: &TradingPair,
        amount_in: U256,
    ) -> Result<TxOutcome> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let params = self.swap_params(wallet, pair, amount_in, now);
        let call = ContractCall {
            to: self.swap.router,
            data: params.encode(),
            label: "swap",
        };
        self.chain.submit(wallet, call).await
    }

    /// Run the full trade sequence for a given pair
    ///
    /// A simulated approval leaves the on-chain allowance unchanged, so the
    /// swap that follows it would always revert in `transferFrom`. In that
    /// case the swap is skipped and the report carries no swap outcome.
    pub async fn execute_pair(
        &self,
        wallet: &SecureWallet,
        pair: TradingPair,
    ) -> Result<TradeReport> {
        info!(pair = %pair, "Trading pair selected");

        let approval = self.ensure_allowance(wallet, &pair.token_in).await?;
        let amount_in = self.size_trade(wallet, &pair.token_in).await?;

        info!(
            amount = %format_units(amount_in, DISPLAY_DECIMALS),
            token = %pair.token_in.symbol,
            "Swapping"
        );

        if approval.as_ref().is_some_and(|a| a.simulated) {
            info!(
                token = %pair.token_in.symbol,
                "Dry run: approval was simulated, skipping swap simulation"
            );
            return Ok(TradeReport {
                pair,
                amount_in,
                approval,
                swap: None,
            });
        }

        let swap = self.submit_swap(wallet, &pair, amount_in).await?;

        info!(
            tx_hash = %swap.hash_string(),
            amount = %format_units(amount_in, DISPLAY_DECIMALS),
            from = %pair.token_in.symbol,
            to = %pair.token_out.symbol,
            "Swap successful"
        );

        Ok(TradeReport {
            pair,
            amount_in,
            approval,
            swap: Some(swap),
        })
    }
}

#[async_trait]
impl<C: ChainClient> Trader for SwapExecutor<C> {
    async fn trade(&self, wallet: &SecureWallet) -> Result<TradeReport> {
        let pair = select_pair(&self.swap.tokens, &mut rand::thread_rng())
            .ok_or_else(|| Error::Config("need at least two tokens to trade".to_string()))?;

        let span = info_span!("trade", id = %Uuid::new_v4(), wallet = %wallet.address());
        self.execute_pair(wallet, pair).instrument(span).await
    }
}
