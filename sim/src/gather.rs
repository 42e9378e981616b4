//! Sequential and concurrent runners with wall-clock capture.
//!
//! Both runners report results in launch order. The concurrent runner
//! observes completions as they happen (completion order depends only on
//! each operation's delay) and slots results back by launch index, so the
//! reporting guarantee is implemented here rather than inherited from the
//! polling primitive.

use std::future::Future;
use std::time::Duration;

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use tokio::time::Instant;

/// Await `ops` strictly one after another, in the order given.
///
/// Total elapsed time is the sum of the individual waits.
pub async fn run_sequential<F>(ops: Vec<F>) -> (Vec<F::Output>, Duration)
where
    F: Future,
{
    let started = Instant::now();
    let mut results = Vec::with_capacity(ops.len());
    for op in ops {
        results.push(op.await);
    }
    (results, started.elapsed())
}

/// Launch `ops` together and collect every result in launch order.
///
/// All operations are issued at once and progress independently over one
/// cooperative execution context; total elapsed time is bounded by the
/// slowest operation, not the sum. A failure value in one slot never aborts
/// its siblings.
pub async fn run_all<F>(ops: Vec<F>) -> (Vec<F::Output>, Duration)
where
    F: Future,
{
    let started = Instant::now();
    let total = ops.len();

    let mut in_flight: FuturesUnordered<_> = ops
        .into_iter()
        .enumerate()
        .map(|(index, op)| async move { (index, op.await) })
        .collect();

    let mut slots: Vec<Option<F::Output>> = Vec::new();
    slots.resize_with(total, || None);
    while let Some((index, output)) = in_flight.next().await {
        slots[index] = Some(output);
    }

    let results = slots
        .into_iter()
        .map(|slot| slot.expect("every launched operation reports exactly once"))
        .collect();
    (results, started.elapsed())
}
