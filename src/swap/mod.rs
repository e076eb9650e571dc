//! Swap trading
//!
//! - [`pair`]: random pair selection
//! - [`executor`]: the approve/size/swap sequence for one trade
//! - [`retry`]: bounded retry of a whole trade

pub mod executor;
pub mod pair;
pub mod retry;

pub use executor::{SwapExecutor, SwapParams, TradeReport};
pub use pair::{select_pair, TradingPair};
pub use retry::{retry_trade, RetryOutcome};

use crate::wallet::SecureWallet;
use crate::Result;
use async_trait::async_trait;

/// Performs one complete trade for a wallet
#[async_trait]
pub trait Trader: Send + Sync {
    async fn trade(&self, wallet: &SecureWallet) -> Result<TradeReport>;
}
