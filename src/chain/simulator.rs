//! Transaction simulation for dry runs
//!
//! Uses `eth_call` plus gas estimation instead of broadcasting, so a dry run
//! walks the full approve/swap sequence without touching chain state.
//!
//! SECURITY NOTE:
//! - This module is read-only - it never signs or submits transactions
//! - Simulation uses the wallet's public address only

use alloy::hex;
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;
use tracing::warn;

/// Result of simulating a transaction
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Whether the simulation succeeded
    pub success: bool,
    /// Estimated gas used (if successful)
    pub gas_used: Option<u64>,
    /// Revert reason (if failed)
    pub revert_reason: Option<String>,
}

impl SimulationResult {
    pub fn success(gas_used: u64) -> Self {
        Self {
            success: true,
            gas_used: Some(gas_used),
            revert_reason: None,
        }
    }

    pub fn failed(reason: String) -> Self {
        Self {
            success: false,
            gas_used: None,
            revert_reason: Some(reason),
        }
    }
}

/// Transaction simulator using eth_call
pub struct TransactionSimulator<'a> {
    provider: &'a DynProvider,
}

impl<'a> TransactionSimulator<'a> {
    pub fn new(provider: &'a DynProvider) -> Self {
        Self { provider }
    }

    /// Simulate a transaction request
    ///
    /// Both the call and the gas estimate must succeed; a failed estimate
    /// means the transaction would not be accepted when broadcast.
    pub async fn simulate(&self, tx: TransactionRequest) -> SimulationResult {
        if let Err(e) = self.provider.call(tx.clone()).await {
            return SimulationResult::failed(Self::parse_revert_reason(&e.to_string()));
        }

        match self.provider.estimate_gas(tx).await {
            Ok(gas_estimate) => SimulationResult::success(gas_estimate),
            Err(e) => {
                warn!(error = %e, "Call succeeded but gas estimation failed");
                SimulationResult::failed(Self::parse_revert_reason(&e.to_string()))
            }
        }
    }

    /// Parse revert reason from RPC error message
    fn parse_revert_reason(error: &str) -> String {
        if error.contains("execution reverted") {
            if let Some(start) = error.find("revert: ") {
                let reason = &error[start + 8..];
                if let Some(end) = reason.find('"') {
                    return reason[..end].to_string();
                }
                return reason.to_string();
            }
            if let Some(start) = error.find("0x") {
                let hex_data = &error[start..];
                let end = hex_data
                    .find(|c: char| !c.is_ascii_hexdigit() && c != 'x')
                    .unwrap_or(hex_data.len());
                let hex = &hex_data[..end];
                // Error(string) selector 0x08c379a0, then offset and length words
                if hex.starts_with("0x08c379a0") && hex.len() > 138 {
                    if let Ok(decoded) = hex::decode(&hex[138..]) {
                        let filtered: Vec<u8> = decoded.into_iter().filter(|&b| b != 0).collect();
                        if let Ok(s) = String::from_utf8(filtered) {
                            return s;
                        }
                    }
                }
                return format!("Reverted with data: {}", hex);
            }
            return "execution reverted".to_string();
        }

        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Bytes, U64};
    use alloy::providers::ProviderBuilder;
    use alloy::transports::mock::Asserter;

    fn mocked_provider(asserter: &Asserter) -> DynProvider {
        ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
            .erased()
    }

    #[tokio::test]
    async fn test_simulate_reports_gas_estimate() {
        let asserter = Asserter::new();
        asserter.push_success(&Bytes::new());
        asserter.push_success(&U64::from(52_000));
        let provider = mocked_provider(&asserter);

        let result = TransactionSimulator::new(&provider)
            .simulate(TransactionRequest::default())
            .await;
        assert!(result.success);
        assert_eq!(result.gas_used, Some(52_000));
    }

    #[tokio::test]
    async fn test_failed_gas_estimate_fails_simulation() {
        let asserter = Asserter::new();
        asserter.push_success(&Bytes::new());
        asserter.push_failure_msg("execution reverted: revert: STF");
        let provider = mocked_provider(&asserter);

        let result = TransactionSimulator::new(&provider)
            .simulate(TransactionRequest::default())
            .await;
        assert!(!result.success);
        assert!(result.gas_used.is_none());
        assert!(result.revert_reason.is_some_and(|r| r.contains("STF")));
    }

    #[test]
    fn test_simulation_result_success() {
        let result = SimulationResult::success(120_000);
        assert!(result.success);
        assert_eq!(result.gas_used, Some(120_000));
        assert!(result.revert_reason.is_none());
    }

    #[test]
    fn test_simulation_result_failed() {
        let result = SimulationResult::failed("STF".to_string());
        assert!(!result.success);
        assert!(result.gas_used.is_none());
        assert_eq!(result.revert_reason, Some("STF".to_string()));
    }

    #[test]
    fn test_parse_revert_reason() {
        let error = "execution reverted: revert: Too little received\"";
        assert_eq!(
            TransactionSimulator::parse_revert_reason(error),
            "Too little received"
        );

        assert_eq!(
            TransactionSimulator::parse_revert_reason("execution reverted"),
            "execution reverted"
        );

        assert_eq!(
            TransactionSimulator::parse_revert_reason("connection refused"),
            "connection refused"
        );
    }

    #[test]
    fn test_parse_error_string_payload() {
        // Error("STF")
        let payload = concat!(
            "0x08c379a0",
            "0000000000000000000000000000000000000000000000000000000000000020",
            "0000000000000000000000000000000000000000000000000000000000000003",
            "5354460000000000000000000000000000000000000000000000000000000000"
        );
        let error = format!("execution reverted, data: {}", payload);
        assert_eq!(TransactionSimulator::parse_revert_reason(&error), "STF");
    }
}
