//! Error types for the daily swap bot

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Insufficient {symbol} balance for swap")]
    InsufficientBalance { symbol: String },

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Transaction {tx_hash} reverted")]
    Reverted { tx_hash: String },

    #[error("Transaction simulation failed: {0}")]
    Simulation(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Failed to read key file {}: {source}", .path.display())]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
