//! Configuration for the daily swap bot

pub mod rpc;

use crate::tokens::{self, Token};
use crate::{Error, Result};
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use rpc::RpcConfig;

/// Environment variable overriding the key file path
pub const KEYS_FILE_ENV: &str = "SWAP_KEYS_FILE";

/// Uniswap V3 fee tiers are encoded as uint24
const MAX_POOL_FEE: u32 = (1 << 24) - 1;

/// Longest accepted swap deadline (one day)
pub const MAX_DEADLINE_SECS: u64 = 24 * 60 * 60;

/// Trading cadence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Trades per wallet in each cycle
    pub trades_per_wallet: u32,
    /// Attempts per trade before giving up
    pub max_attempts: u32,
    /// Pause between cycles (seconds)
    pub cycle_interval_secs: u64,
}

impl ScheduleConfig {
    pub fn cycle_interval(&self) -> Duration {
        Duration::from_secs(self.cycle_interval_secs)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            trades_per_wallet: 5,
            max_attempts: 5,
            cycle_interval_secs: 24 * 60 * 60,
        }
    }
}

/// Swap parameters shared by every trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapConfig {
    /// Router contract address
    pub router: Address,
    /// Pool fee tier (hundredths of a basis point, 3000 = 0.3%)
    pub pool_fee: u32,
    /// Seconds from submission until the swap deadline
    pub deadline_secs: u64,
    /// Tokens the pair selector draws from
    pub tokens: Vec<Token>,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            router: tokens::addresses::ROUTER,
            pool_fee: 3000,
            deadline_secs: 10 * 60,
            tokens: tokens::default_tokens(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chain endpoint
    pub rpc: RpcConfig,
    /// Router and token settings
    pub swap: SwapConfig,
    /// Trading cadence
    pub schedule: ScheduleConfig,
    /// Line-delimited private key file
    pub keys_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            swap: SwapConfig::default(),
            schedule: ScheduleConfig::default(),
            keys_file: PathBuf::from("private_keys.txt"),
        }
    }
}

impl Config {
    /// Load a JSON config file; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply environment variable overrides
    pub fn apply_env(mut self) -> Result<Self> {
        self.rpc = self.rpc.apply_env()?;
        if let Ok(path) = std::env::var(KEYS_FILE_ENV) {
            self.keys_file = PathBuf::from(path);
        }
        Ok(self)
    }

    /// Reject settings the trade loop cannot run with
    pub fn validate(&self) -> Result<()> {
        let distinct: HashSet<Address> = self.swap.tokens.iter().map(|t| t.address).collect();
        if distinct.len() < 2 {
            return Err(Error::Config(
                "at least two distinct tokens are required".to_string(),
            ));
        }
        if distinct.len() != self.swap.tokens.len() {
            return Err(Error::Config("token list contains duplicates".to_string()));
        }
        if self.swap.pool_fee > MAX_POOL_FEE {
            return Err(Error::Config(format!(
                "pool fee {} does not fit in uint24",
                self.swap.pool_fee
            )));
        }
        if self.swap.deadline_secs == 0 || self.swap.deadline_secs > MAX_DEADLINE_SECS {
            return Err(Error::Config(format!(
                "deadline_secs must be between 1 and {}, got {}",
                MAX_DEADLINE_SECS, self.swap.deadline_secs
            )));
        }
        if self.schedule.max_attempts == 0 {
            return Err(Error::Config("max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }
}
