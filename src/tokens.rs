//! Token registry for the swap pairs
//!
//! The bot trades between a small fixed set of ERC20 tokens deployed on the
//! 0G testnet. The list lives in [`Config`](crate::Config) so it can be
//! overridden, but these defaults are what the router pools are seeded with.

use alloy::primitives::{address, Address, U256};
use serde::{Deserialize, Serialize};

/// Well-known contract addresses on the 0G testnet
pub mod addresses {
    use super::*;

    pub const USDT: Address = address!("9A87C2412d500343c073E5Ae5394E3bE3874F76b");
    pub const ETH: Address = address!("ce830d0905e0f7a9b300401729761579c5fb6bd6");
    pub const BTC: Address = address!("1E0D871472973c562650E991ED8006549F8CBEfc");

    /// Uniswap V3 style swap router
    pub const ROUTER: Address = address!("D86b764618c6E3C078845BE3c3fCe50CE9535Da7");
}

/// Token metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Contract address
    pub address: Address,
    /// Display symbol (e.g., "USDT")
    pub symbol: String,
}

impl Token {
    pub fn new(address: Address, symbol: impl Into<String>) -> Self {
        Self {
            address,
            symbol: symbol.into(),
        }
    }
}

/// The three tokens traded by default
pub fn default_tokens() -> Vec<Token> {
    vec![
        Token::new(addresses::USDT, "USDT"),
        Token::new(addresses::ETH, "ETH"),
        Token::new(addresses::BTC, "BTC"),
    ]
}

/// Format a U256 value with decimals
pub fn format_units(value: U256, decimals: u32) -> String {
    if value.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10).pow(U256::from(decimals));
    let whole = value / divisor;
    let remainder = value % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let remainder_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = remainder_str.trim_end_matches('0');
        format!("{}.{}", whole, trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tokens_are_distinct() {
        let tokens = default_tokens();
        assert_eq!(tokens.len(), 3);
        assert_ne!(tokens[0].address, tokens[1].address);
        assert_ne!(tokens[1].address, tokens[2].address);
        assert_ne!(tokens[0].address, tokens[2].address);
    }

    #[test]
    fn test_format_units() {
        let one_eth = U256::from(1_000_000_000_000_000_000u128);
        assert_eq!(format_units(one_eth, 18), "1");

        let one_point_five = U256::from(1_500_000_000_000_000_000u128);
        assert_eq!(format_units(one_point_five, 18), "1.5");

        // Sub-unit amounts keep their leading zeros
        assert_eq!(format_units(U256::from(5u64), 18), "0.000000000000000005");

        assert_eq!(format_units(U256::ZERO, 18), "0");
    }
}
