//! Fixed-pause retry wrapper around fallible simulated operations.
//!
//! The wrapper contains [`SimulatedFailure`]s entirely: a fault is retried
//! after a fixed pause, and exhaustion is reported as an ordinary
//! [`RetryOutcome::Exhausted`] value rather than propagated. Callers in an
//! aggregation batch therefore never see a sibling's failure.

use std::future::Future;
use std::time::Duration;

use tokio::time;

use crate::fetch::{FetchOutcome, Payload, SimulatedFailure};

/// Retry configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
    /// Fixed pause between consecutive attempts.
    pub pause: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            pause: Duration::from_millis(100),
        }
    }
}

/// Outcome of a retried operation.
///
/// A sum type that structurally distinguishes success from exhaustion, so
/// callers cannot treat an exhausted operation as a completed one.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryOutcome {
    /// An attempt succeeded; `attempts` counts how many were made in total.
    Completed { payload: Payload, attempts: u32 },
    /// Every attempt faulted. Carries the final fault for inspection.
    Exhausted {
        attempts: u32,
        source: SimulatedFailure,
    },
}

impl RetryOutcome {
    /// Total number of attempts made.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Completed { attempts, .. } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Collapse into a [`FetchOutcome`] slot value for aggregation.
    #[must_use]
    pub fn into_fetch_outcome(self) -> FetchOutcome {
        match self {
            Self::Completed { payload, .. } => FetchOutcome::Completed(payload),
            Self::Exhausted { attempts, source } => FetchOutcome::Failed {
                id: source.id,
                attempts,
            },
        }
    }
}

/// Run `op` until it succeeds or `config.max_attempts` attempts have faulted.
///
/// `op` receives the 1-based attempt number. A success at any attempt returns
/// immediately with no further retries; between failed attempts the wrapper
/// sleeps `config.pause`.
pub async fn retry<F, Fut>(config: &RetryConfig, mut op: F) -> RetryOutcome
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Payload, SimulatedFailure>>,
{
    // max_attempts == 0 would mean "never try"; treat it as a single attempt.
    let max_attempts = config.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match op(attempt).await {
            Ok(payload) => {
                tracing::debug!(id = %payload.id, attempt, "attempt succeeded");
                return RetryOutcome::Completed {
                    payload,
                    attempts: attempt,
                };
            }
            Err(failure) => {
                if attempt == max_attempts {
                    tracing::debug!(
                        id = %failure.id,
                        attempts = max_attempts,
                        "retries exhausted"
                    );
                    return RetryOutcome::Exhausted {
                        attempts: max_attempts,
                        source: failure,
                    };
                }
                tracing::debug!(
                    id = %failure.id,
                    attempt,
                    pause_ms = config.pause.as_millis() as u64,
                    "attempt faulted, pausing before retry"
                );
                time::sleep(config.pause).await;
            }
        }
    }

    unreachable!("the attempt loop returns on success or exhaustion")
}
