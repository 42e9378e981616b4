//! The simulated fetch primitive and its terminal outcomes.
//!
//! A fetch models one I/O-bound operation: it waits on the tokio timer for a
//! configured delay and returns a payload tagged with its identifier. The
//! wait is a genuine suspension point, so the runtime is free to drive
//! sibling operations while this one is pending.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tokio::time;

/// Result of a completed fetch, tagged with the identifier that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub id: String,
    pub body: String,
}

/// A transient fault injected by [`flaky_fetch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("simulated network error fetching {id} (attempt {attempt})")]
pub struct SimulatedFailure {
    /// Identifier of the operation that faulted.
    pub id: String,
    /// 1-based attempt number on which the fault occurred.
    pub attempt: u32,
}

/// Terminal state of one simulated operation.
///
/// Every variant is an ordinary value. A timed-out or failed operation is
/// reported, never raised, so sibling operations in the same batch are not
/// disturbed.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The delay elapsed and the operation produced its payload.
    Completed(Payload),
    /// The operation was abandoned at `bound` before its delay elapsed.
    TimedOut { id: String, bound: Duration },
    /// Every retry attempt faulted; `attempts` is the total attempt count.
    Failed { id: String, attempts: u32 },
}

impl FetchOutcome {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Identifier of the operation, whatever its fate.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Completed(payload) => &payload.id,
            Self::TimedOut { id, .. } | Self::Failed { id, .. } => id,
        }
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed(payload) => write!(f, "{}", payload.body),
            Self::TimedOut { id, bound } => {
                write!(f, "TIMEOUT: {id} exceeded {}ms", bound.as_millis())
            }
            Self::Failed { id, attempts } => {
                write!(f, "FAILED after {attempts} attempts: {id}")
            }
        }
    }
}

/// Simulate fetching `id`, taking `delay` of timer time.
///
/// Takes ownership of the identifier so the returned future is `'static`
/// and can be launched in a batch.
pub async fn fetch(id: impl Into<String>, delay: Duration) -> Payload {
    let id = id.into();
    tracing::debug!(id = %id, delay_ms = delay.as_millis() as u64, "fetch started");
    time::sleep(delay).await;
    tracing::debug!(id = %id, "fetch completed");
    Payload {
        body: format!("data from {id}"),
        id,
    }
}

/// Run a fetch under a deadline.
///
/// If `delay` exceeds `bound` the fetch is abandoned at the bound and
/// reported as [`FetchOutcome::TimedOut`]; the pending sleep is dropped, so
/// nothing lingers past the deadline. Abandonment is local to this one
/// operation.
pub async fn fetch_with_deadline(
    id: impl Into<String>,
    delay: Duration,
    bound: Duration,
) -> FetchOutcome {
    let id = id.into();
    match time::timeout(bound, fetch(id.clone(), delay)).await {
        Ok(payload) => FetchOutcome::Completed(payload),
        Err(_elapsed) => {
            tracing::debug!(
                id = %id,
                bound_ms = bound.as_millis() as u64,
                "fetch abandoned at deadline"
            );
            FetchOutcome::TimedOut { id, bound }
        }
    }
}

/// A fetch that faults on every attempt numbered below `fail_before`.
///
/// Demo fixture: with `fail_before = 2` the first attempt faults and the
/// retry succeeds. The delay is paid on every attempt, success or not.
pub async fn flaky_fetch(
    id: impl Into<String>,
    delay: Duration,
    attempt: u32,
    fail_before: u32,
) -> Result<Payload, SimulatedFailure> {
    let id = id.into();
    time::sleep(delay).await;
    if attempt < fail_before {
        Err(SimulatedFailure { id, attempt })
    } else {
        Ok(Payload {
            body: format!("data from {id} (attempt {attempt})"),
            id,
        })
    }
}
