//! Daily Swap Bot
//!
//! Runs small automated swaps for a list of wallets against a Uniswap V3
//! style router:
//! - Picks a random token pair per trade
//! - Grants the router an unlimited allowance when needed
//! - Swaps 5% of the input token balance
//! - Retries failed trades, then sleeps a day and repeats
//!
//! # Security Model
//!
//! - Private keys are re-read from the key file before each cycle and live
//!   only inside [`wallet::SecureWallet`]
//! - Logs carry wallet addresses, never keys
//! - Swaps carry no slippage protection; intended for testnets only

pub mod banner;
pub mod chain;
pub mod config;
pub mod scheduler;
pub mod swap;
pub mod tokens;
pub mod wallet;

mod error;

// Re-export commonly used types
pub use chain::{ChainClient, ContractCall, RpcChainClient, TxOutcome};
pub use config::{Config, RpcConfig, ScheduleConfig, SwapConfig};
pub use error::{Error, Result};
pub use scheduler::{CycleSummary, DailyRunner};
pub use swap::{SwapExecutor, TradeReport, Trader};
