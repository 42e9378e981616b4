//! Simulated-latency operations for mocknet.
//!
//! Models a single logical operation, [`fetch`], that waits out a configured
//! delay on the tokio timer, plus the wrappers a real client would put
//! around it: a deadline ([`fetch_with_deadline`]), a fixed-pause retry
//! ([`retry`]), and runners that execute a batch either strictly one after
//! another ([`run_sequential`]) or all at once ([`run_all`]).
//!
//! All waits are cooperative: one execution context multiplexes every
//! pending operation, and no operation blocks the context while waiting.
//! Failures and timeouts are modeled as values ([`FetchOutcome`]), never as
//! panics, so a batch always runs to completion.

mod fetch;
mod gather;
mod retry;

pub use fetch::{FetchOutcome, Payload, SimulatedFailure, fetch, fetch_with_deadline, flaky_fetch};
pub use gather::{run_all, run_sequential};
pub use retry::{RetryConfig, RetryOutcome, retry};
