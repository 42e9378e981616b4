//! Wall-clock properties of the fetch harness.
//!
//! All tests run under a paused tokio clock (`start_paused = true`): sleeps
//! auto-advance virtual time, so the assertions are exact rather than
//! tolerance-based.

use std::pin::Pin;
use std::time::Duration;

use tokio::time::Instant;

use mocknet_sim::{
    FetchOutcome, RetryConfig, fetch, fetch_with_deadline, flaky_fetch, retry, run_all,
    run_sequential,
};

const DELAY: Duration = Duration::from_millis(200);

#[tokio::test(start_paused = true)]
async fn concurrent_batch_is_bounded_by_the_slowest_delay() {
    let ops: Vec<_> = (1..=5).map(|i| fetch(format!("api{i}"), DELAY)).collect();
    let (results, elapsed) = run_all(ops).await;

    assert_eq!(results.len(), 5);
    // Far below the 5 * 200ms a sequential run would need, and at least one
    // full delay (nothing completes early).
    assert!(elapsed < DELAY * 5, "elapsed {elapsed:?}");
    assert!(elapsed >= DELAY, "elapsed {elapsed:?}");
    assert!(elapsed < DELAY + Duration::from_millis(50), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn sequential_batch_pays_the_sum_of_delays() {
    let ops: Vec<_> = (1..=5).map(|i| fetch(format!("api{i}"), DELAY)).collect();
    let (results, elapsed) = run_sequential(ops).await;

    assert_eq!(results.len(), 5);
    assert!(elapsed >= DELAY * 5, "elapsed {elapsed:?}");
    assert!(elapsed < DELAY * 5 + Duration::from_millis(50), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn deadline_wrapper_returns_at_the_bound_not_the_delay() {
    let bound = Duration::from_millis(150);
    let started = Instant::now();
    let outcome = fetch_with_deadline("api-slow", Duration::from_secs(2), bound).await;
    let elapsed = started.elapsed();

    assert!(matches!(outcome, FetchOutcome::TimedOut { .. }));
    assert!(elapsed >= bound, "elapsed {elapsed:?}");
    assert!(elapsed < bound + Duration::from_millis(50), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn retry_stops_at_the_first_success() {
    let config = RetryConfig {
        max_attempts: 3,
        pause: Duration::from_millis(100),
    };
    let outcome = retry(&config, |attempt| {
        flaky_fetch("api-flaky", Duration::from_millis(50), attempt, 2)
    })
    .await;

    assert!(outcome.is_completed());
    assert_eq!(outcome.attempts(), 2, "success must stop the loop");
}

#[tokio::test(start_paused = true)]
async fn a_timed_out_sibling_never_delays_the_batch() {
    // One operation exceeds its bound; the other two complete normally and
    // the batch still reports every slot in launch order.
    let ops: Vec<Pin<Box<dyn Future<Output = FetchOutcome>>>> = vec![
        Box::pin(fetch_with_deadline(
            "op1",
            Duration::from_millis(100),
            Duration::from_secs(1),
        )),
        Box::pin(fetch_with_deadline(
            "op2",
            Duration::from_secs(5),
            Duration::from_millis(200),
        )),
        Box::pin(fetch_with_deadline(
            "op3",
            Duration::from_millis(50),
            Duration::from_secs(1),
        )),
    ];
    let (results, elapsed) = run_all(ops).await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_completed());
    assert!(matches!(results[1], FetchOutcome::TimedOut { .. }));
    assert!(results[2].is_completed());
    assert_eq!(
        results.iter().map(FetchOutcome::id).collect::<Vec<_>>(),
        vec!["op1", "op2", "op3"],
    );
    // The abandoned operation caps the batch at its 200ms bound, not its 5s delay.
    assert!(elapsed < Duration::from_millis(300), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_are_an_ordinary_slot_value() {
    let config = RetryConfig {
        max_attempts: 2,
        pause: Duration::from_millis(20),
    };
    let ops: Vec<Pin<Box<dyn Future<Output = FetchOutcome>>>> = vec![
        Box::pin(async {
            FetchOutcome::Completed(fetch("op1", Duration::from_millis(100)).await)
        }),
        Box::pin(async move {
            retry(&config, |attempt| {
                flaky_fetch("op2", Duration::from_millis(30), attempt, 10)
            })
            .await
            .into_fetch_outcome()
        }),
    ];
    let (results, _elapsed) = run_all(ops).await;

    assert!(results[0].is_completed());
    assert_eq!(
        results[1],
        FetchOutcome::Failed {
            id: "op2".to_string(),
            attempts: 2,
        }
    );
}

#[tokio::test(start_paused = true)]
async fn launch_order_reporting_survives_out_of_order_completion() {
    // Delays 1 : 2 : 0.5 — completion order is op3, op1, op2.
    let ops = vec![
        fetch("op1", Duration::from_millis(100)),
        fetch("op2", Duration::from_millis(200)),
        fetch("op3", Duration::from_millis(50)),
    ];
    let (results, elapsed) = run_all(ops).await;

    let ids: Vec<_> = results.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["op1", "op2", "op3"]);
    assert!(elapsed >= Duration::from_millis(200), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(250), "elapsed {elapsed:?}");
}
