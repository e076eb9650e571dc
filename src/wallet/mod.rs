//! Wallet management
//!
//! This module handles private key loading and transaction signing.
//! The private key NEVER leaves this module in readable form.

mod keys;
mod signer;

pub use keys::{load_wallets, read_keys};
pub use signer::SecureWallet;
