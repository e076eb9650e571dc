//! Bounded retry around a whole trade attempt
//!
//! Attempts run back to back with no delay. Every error is treated the same
//! way: a revert is retried exactly like a dropped connection.

use std::fmt::Display;
use std::future::Future;
use tracing::{error, info, warn};

/// Final state of a retried operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    /// The operation succeeded on attempt `attempts`
    Succeeded { value: T, attempts: u32 },
    /// Every attempt failed; holds the last error message
    Exhausted { attempts: u32, last_error: String },
}

impl<T> RetryOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, RetryOutcome::Succeeded { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Succeeded { attempts, .. } | RetryOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Run `op` until it succeeds or `max_attempts` attempts have failed
///
/// `op` receives the 1-based attempt number. Exhaustion is logged and
/// returned, never raised.
pub async fn retry_trade<F, Fut, T, E>(label: &str, max_attempts: u32, mut op: F) -> RetryOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op(attempt).await {
            Ok(value) => {
                info!(wallet = label, attempt, "Trade successful");
                return RetryOutcome::Succeeded {
                    value,
                    attempts: attempt,
                };
            }
            Err(e) if attempt < max_attempts => {
                warn!(wallet = label, attempt, error = %e, "Trade failed, retrying");
            }
            Err(e) => {
                error!(
                    wallet = label,
                    attempts = attempt,
                    error = %e,
                    "All trade attempts failed"
                );
                return RetryOutcome::Exhausted {
                    attempts: attempt,
                    last_error: e.to_string(),
                };
            }
        }
    }
}
