//! RPC endpoint configuration
//!
//! The bot talks to a single chain. The endpoint comes from, in priority order:
//! 1. `SWAP_RPC_URL` / `SWAP_CHAIN_ID` environment variables
//! 2. The `rpc` section of the JSON config file
//! 3. The public 0G testnet endpoint (rate limited)
//!
//! ```bash
//! export SWAP_RPC_URL="https://my-node.example/rpc"
//! export SWAP_CHAIN_ID=16600
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Chain ID constants
pub mod chains {
    pub const ZG_TESTNET: u64 = 16600;
}

/// Environment variable names
pub(crate) mod env_vars {
    pub const RPC_URL: &str = "SWAP_RPC_URL";
    pub const CHAIN_ID: &str = "SWAP_CHAIN_ID";
}

/// Public RPC endpoints (rate limited)
mod public_rpcs {
    pub const ZG_TESTNET: &str = "https://evmrpc-testnet.0g.ai";
}

/// RPC configuration for the target chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC HTTP endpoint
    pub url: String,
    /// Chain ID used when signing transactions
    pub chain_id: u64,
}

impl RpcConfig {
    /// Apply environment variable overrides
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(env_vars::RPC_URL) {
            tracing::debug!("Using {} for RPC endpoint", env_vars::RPC_URL);
            self.url = url;
        }
        if let Some(raw) = lookup(env_vars::CHAIN_ID) {
            self.chain_id = raw.trim().parse().map_err(|e| {
                Error::Config(format!("{} is not a chain id: {}", env_vars::CHAIN_ID, e))
            })?;
        }
        if self.url == public_rpcs::ZG_TESTNET {
            tracing::warn!("Using public RPC endpoint (rate limited)");
        }
        Ok(self)
    }

    /// Parse the endpoint URL
    pub fn parsed_url(&self) -> Result<url::Url> {
        self.url
            .parse()
            .map_err(|e| Error::Config(format!("Invalid RPC URL {}: {}", self.url, e)))
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: public_rpcs::ZG_TESTNET.to_string(),
            chain_id: chains::ZG_TESTNET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_is_public_testnet() {
        let config = RpcConfig::default();
        assert_eq!(config.url, public_rpcs::ZG_TESTNET);
        assert_eq!(config.chain_id, chains::ZG_TESTNET);
        assert!(config.parsed_url().is_ok());
    }

    #[test]
    fn test_env_overrides_url_and_chain() {
        let config = RpcConfig::default()
            .apply_overrides(lookup(&[
                (env_vars::RPC_URL, "https://custom.rpc"),
                (env_vars::CHAIN_ID, "31337"),
            ]))
            .unwrap();

        assert_eq!(config.url, "https://custom.rpc");
        assert_eq!(config.chain_id, 31337);
    }

    #[test]
    fn test_bad_chain_id_is_config_error() {
        let err = RpcConfig::default()
            .apply_overrides(lookup(&[(env_vars::CHAIN_ID, "zero-g")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_url() {
        let config = RpcConfig {
            url: "not a url".to_string(),
            chain_id: 1,
        };
        assert!(config.parsed_url().is_err());
    }
}
