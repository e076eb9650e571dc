//! Daily trading loop
//!
//! Walks the wallet list in file order, runs a fixed number of retried trades
//! per wallet, sleeps for the cycle interval and starts over. Nothing is
//! persisted: a restart begins again at the first wallet.
//!
//! When a key file is attached, it is re-read before every cycle after the
//! first, so keys added or removed during the pause take effect on the next
//! pass. A failed reload keeps the previous wallet list.

use crate::config::ScheduleConfig;
use crate::swap::{retry_trade, RetryOutcome, Trader};
use crate::wallet::{load_wallets, SecureWallet};
use std::path::PathBuf;
use tracing::{info, info_span, warn, Instrument};

/// Totals for one pass over the wallet list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Trades that eventually succeeded
    pub succeeded: u32,
    /// Trades that failed every attempt
    pub exhausted: u32,
}

impl CycleSummary {
    pub fn total(&self) -> u32 {
        self.succeeded + self.exhausted
    }
}

/// Runner that drives trades for every wallet on a fixed cadence
pub struct DailyRunner<T> {
    trader: T,
    wallets: Vec<SecureWallet>,
    keys_file: Option<PathBuf>,
    schedule: ScheduleConfig,
    max_cycles: Option<u64>,
}

impl<T: Trader> DailyRunner<T> {
    /// Create a runner that loops forever
    pub fn new(trader: T, wallets: Vec<SecureWallet>, schedule: ScheduleConfig) -> Self {
        Self {
            trader,
            wallets,
            keys_file: None,
            schedule,
            max_cycles: None,
        }
    }

    /// Re-read wallets from `path` at the start of each later cycle
    pub fn with_keys_file(mut self, path: PathBuf) -> Self {
        self.keys_file = Some(path);
        self
    }

    /// Stop after `cycles` passes over the wallet list
    pub fn with_max_cycles(mut self, cycles: u64) -> Self {
        self.max_cycles = Some(cycles);
        self
    }

    pub fn trader(&self) -> &T {
        &self.trader
    }

    /// One pass over the initial wallet list
    pub async fn run_cycle(&self) -> CycleSummary {
        self.run_wallets(&self.wallets).await
    }

    /// One pass: every wallet, `trades_per_wallet` retried trades each
    async fn run_wallets(&self, wallets: &[SecureWallet]) -> CycleSummary {
        let mut summary = CycleSummary::default();

        for wallet in wallets {
            let address = wallet.address().to_string();
            for iteration in 1..=self.schedule.trades_per_wallet {
                info!(wallet = %address, iteration, "Starting iteration");

                let outcome = retry_trade(&address, self.schedule.max_attempts, |attempt| {
                    let span = info_span!("attempt", attempt);
                    self.trader.trade(wallet).instrument(span)
                })
                .await;

                match outcome {
                    RetryOutcome::Succeeded { .. } => summary.succeeded += 1,
                    RetryOutcome::Exhausted { .. } => summary.exhausted += 1,
                }
            }
        }

        summary
    }

    fn reload_wallets(&self, current: Vec<SecureWallet>) -> Vec<SecureWallet> {
        let Some(path) = &self.keys_file else {
            return current;
        };
        match load_wallets(path) {
            Ok(wallets) => wallets,
            Err(e) => {
                warn!(
                    error = %e,
                    wallets = current.len(),
                    "Key file reload failed, keeping previous wallets"
                );
                current
            }
        }
    }

    /// Run cycles until `max_cycles` is reached (forever when unset)
    pub async fn run(&self) {
        info!(
            wallets = self.wallets.len(),
            trades_per_wallet = self.schedule.trades_per_wallet,
            max_attempts = self.schedule.max_attempts,
            "Starting daily swap loop"
        );

        let mut wallets = self.wallets.clone();
        let mut cycle: u64 = 0;
        loop {
            cycle += 1;
            if cycle > 1 {
                wallets = self.reload_wallets(wallets);
            }
            let summary = self.run_wallets(&wallets).await;
            info!(
                cycle,
                succeeded = summary.succeeded,
                exhausted = summary.exhausted,
                "All wallets processed"
            );

            if self.max_cycles.is_some_and(|max| cycle >= max) {
                info!(cycle, "Cycle limit reached, stopping");
                return;
            }

            let pause = self.schedule.cycle_interval();
            info!(hours = pause.as_secs_f64() / 3600.0, "Waiting before next cycle");
            tokio::time::sleep(pause).await;
            info!("Delay complete, processing resumes");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swap::TradeReport;
    use crate::{Error, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    const KEYS: [&str; 3] = [
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
        "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
    ];

    /// Records which wallet each trade call was made for, failing every call
    struct RecordingTrader {
        calls: Mutex<Vec<alloy::primitives::Address>>,
    }

    #[async_trait]
    impl Trader for RecordingTrader {
        async fn trade(&self, wallet: &SecureWallet) -> Result<TradeReport> {
            self.calls.lock().unwrap().push(wallet.address());
            Err(Error::Rpc("node unavailable".to_string()))
        }
    }

    fn wallets(n: usize) -> Vec<SecureWallet> {
        KEYS[..n]
            .iter()
            .map(|k| SecureWallet::from_hex(k).unwrap())
            .collect()
    }

    fn schedule(trades: u32, attempts: u32) -> ScheduleConfig {
        ScheduleConfig {
            trades_per_wallet: trades,
            max_attempts: attempts,
            cycle_interval_secs: 0,
        }
    }

    fn hourly(trades: u32) -> ScheduleConfig {
        ScheduleConfig {
            cycle_interval_secs: 3600,
            ..schedule(trades, 1)
        }
    }

    fn call_count(runner: &DailyRunner<RecordingTrader>) -> usize {
        runner.trader().calls.lock().unwrap().len()
    }

    fn recording() -> RecordingTrader {
        RecordingTrader {
            calls: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn test_cycle_runs_five_retried_trades_per_wallet_in_order() {
        let wallets = wallets(3);
        let expected_order: Vec<_> = wallets.iter().map(|w| w.address()).collect();
        let runner = DailyRunner::new(recording(), wallets, schedule(5, 1));

        let summary = runner.run_cycle().await;
        assert_eq!(summary.total(), 15);
        assert_eq!(summary.exhausted, 15);

        let calls = runner.trader().calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 15);
        for (i, chunk) in calls.chunks(5).enumerate() {
            assert!(chunk.iter().all(|a| *a == expected_order[i]));
        }
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_cycle() {
        let runner = DailyRunner::new(recording(), wallets(2), schedule(5, 5));

        let summary = runner.run_cycle().await;
        assert_eq!(summary.exhausted, 10);
        // 5 trades x 5 attempts x 2 wallets
        assert_eq!(runner.trader().calls.lock().unwrap().len(), 50);
    }

    #[tokio::test]
    async fn test_run_stops_at_cycle_limit() {
        let runner =
            DailyRunner::new(recording(), wallets(2), schedule(5, 1)).with_max_cycles(2);

        runner.run().await;
        assert_eq!(runner.trader().calls.lock().unwrap().len(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_follows_the_whole_cycle() {
        let runner = DailyRunner::new(recording(), wallets(2), hourly(5)).with_max_cycles(2);
        let start = tokio::time::Instant::now();

        let observe = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            assert_eq!(call_count(&runner), 10);
            tokio::time::sleep(Duration::from_secs(3598)).await;
            assert_eq!(call_count(&runner), 10);
        };
        tokio::join!(runner.run(), observe);

        assert_eq!(call_count(&runner), 20);
        assert!(start.elapsed() >= Duration::from_secs(3600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_key_file_is_reread_each_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("private_keys.txt");
        std::fs::write(&path, format!("{}\n", KEYS[0])).unwrap();

        let initial = load_wallets(&path).unwrap();
        let runner = DailyRunner::new(recording(), initial, hourly(1))
            .with_keys_file(path.clone())
            .with_max_cycles(2);

        let edit = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            std::fs::write(&path, format!("{}\n{}\n", KEYS[1], KEYS[2])).unwrap();
        };
        tokio::join!(runner.run(), edit);

        let expected: Vec<_> = wallets(3).iter().map(|w| w.address()).collect();
        assert_eq!(*runner.trader().calls.lock().unwrap(), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_reload_keeps_previous_wallets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("private_keys.txt");
        std::fs::write(&path, format!("{}\n", KEYS[0])).unwrap();

        let initial = load_wallets(&path).unwrap();
        let runner = DailyRunner::new(recording(), initial, hourly(1))
            .with_keys_file(path.clone())
            .with_max_cycles(2);

        let edit = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            std::fs::write(&path, "\n  \n").unwrap();
        };
        tokio::join!(runner.run(), edit);

        let first = wallets(1)[0].address();
        assert_eq!(*runner.trader().calls.lock().unwrap(), vec![first, first]);
    }

    #[tokio::test]
    async fn test_empty_wallet_list() {
        let runner = DailyRunner::new(recording(), Vec::new(), schedule(5, 5));
        assert_eq!(runner.run_cycle().await, CycleSummary::default());
    }
}
