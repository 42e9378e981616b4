//! mocknet - binary entry point.
//!
//! Runs both demonstrations end to end and prints every outcome:
//!
//! 1. The validation pipeline: raw JSON input is validated field by field
//!    (collecting every violation) and converted into plain records.
//! 2. The fetch harness: the same batch of simulated fetches executed
//!    sequentially and then concurrently, followed by the deadline, retry,
//!    and variable-delay patterns.
//!
//! Nothing here is fatal: invalid input, timeouts, and exhausted retries
//! are expected outcomes and are printed, not raised.

use std::io;
use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use mocknet_sim::{
    Payload, RetryConfig, fetch, fetch_with_deadline, flaky_fetch, retry, run_all, run_sequential,
};
use mocknet_types::{
    ValidationError, validate_and_build_order, validate_and_build_product,
    validate_and_build_user,
};

/// Per-operation delay for the sequential-vs-concurrent comparison.
const FETCH_DELAY: Duration = Duration::from_millis(200);
/// Number of operations in the comparison batch.
const FETCH_COUNT: usize = 5;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    tracing::info!("mocknet demo starting");

    validation_demo();

    let sequential = sequential_demo().await;
    let concurrent = concurrent_demo().await;
    let speedup = sequential.as_secs_f64() / concurrent.as_secs_f64();
    println!("\n== comparison ==");
    println!("sequential: {:.3}s", sequential.as_secs_f64());
    println!("concurrent: {:.3}s", concurrent.as_secs_f64());
    println!("speedup:    {speedup:.1}x");

    advanced_demo().await;

    Ok(())
}

// ============================================================================
// Validation pipeline
// ============================================================================

fn print_violations(err: &ValidationError) {
    for violation in err.errors() {
        println!("  violation - {violation}");
    }
}

fn validation_demo() {
    println!("== validation pipeline ==");

    let valid_user = json!({ "name": "Alice", "email": "alice@example.com", "age": 30 });
    match validate_and_build_user(&valid_user) {
        Ok(user) => println!("user created: {user:?}"),
        Err(err) => print_violations(&err),
    }

    let invalid_user = json!({ "name": "Bob", "email": "invalid-email", "age": -5 });
    match validate_and_build_user(&invalid_user) {
        Ok(user) => println!("user created: {user:?}"),
        Err(err) => print_violations(&err),
    }

    let valid_product = json!({ "name": "Laptop", "price": 999.99, "quantity": 10 });
    match validate_and_build_product(&valid_product) {
        Ok(product) => println!("product created: {product:?}"),
        Err(err) => print_violations(&err),
    }

    let invalid_product = json!({ "name": "Phone", "price": -199.99, "quantity": -5 });
    match validate_and_build_product(&invalid_product) {
        Ok(product) => println!("product created: {product:?}"),
        Err(err) => print_violations(&err),
    }

    let valid_order = json!({
        "order_id": 1,
        "user_id": 1,
        "product_ids": [1, 2],
        "total_amount": 1199.98,
    });
    match validate_and_build_order(&valid_order) {
        Ok(order) => println!("order created: {order:?}"),
        Err(err) => print_violations(&err),
    }

    let invalid_order = json!({
        "order_id": 2,
        "user_id": 1,
        "product_ids": [],
        "total_amount": -50.0,
    });
    match validate_and_build_order(&invalid_order) {
        Ok(order) => println!("order created: {order:?}"),
        Err(err) => print_violations(&err),
    }
}

// ============================================================================
// Sequential vs concurrent
// ============================================================================

fn comparison_batch() -> Vec<impl Future<Output = Payload>> {
    (1..=FETCH_COUNT)
        .map(|i| fetch(format!("http://api{i}.com"), FETCH_DELAY))
        .collect()
}

async fn sequential_demo() -> Duration {
    println!("\n== sequential: {FETCH_COUNT} fetches, one at a time ==");
    let (results, elapsed) = run_sequential(comparison_batch()).await;
    for payload in &results {
        println!("  {}", payload.body);
    }
    println!("elapsed: {:.3}s", elapsed.as_secs_f64());
    elapsed
}

async fn concurrent_demo() -> Duration {
    println!("\n== concurrent: {FETCH_COUNT} fetches, launched together ==");
    let (results, elapsed) = run_all(comparison_batch()).await;
    for payload in &results {
        println!("  {}", payload.body);
    }
    println!("elapsed: {:.3}s", elapsed.as_secs_f64());
    elapsed
}

// ============================================================================
// Deadline, retry, and variable delays
// ============================================================================

async fn advanced_demo() {
    println!("\n== deadline ==");
    // Delay outlives the bound, so this reports TimedOut at ~150ms.
    let outcome = fetch_with_deadline(
        "http://api-slow.com",
        Duration::from_millis(400),
        Duration::from_millis(150),
    )
    .await;
    println!("  {outcome}");

    println!("\n== retry ==");
    // Fixture: fault on attempt 1, succeed on attempt 2.
    let config = RetryConfig {
        max_attempts: 3,
        pause: Duration::from_millis(50),
    };
    let outcome = retry(&config, |attempt| {
        flaky_fetch("http://api-flaky.com", Duration::from_millis(50), attempt, 2)
    })
    .await;
    println!("  attempts: {}", outcome.attempts());
    println!("  {}", outcome.into_fetch_outcome());

    println!("\n== variable delays, reported in launch order ==");
    let ops = vec![
        fetch("http://api1.com", Duration::from_millis(100)),
        fetch("http://api2.com", Duration::from_millis(200)),
        fetch("http://api3.com", Duration::from_millis(50)),
    ];
    let (results, elapsed) = run_all(ops).await;
    for payload in &results {
        println!("  {}", payload.body);
    }
    println!("elapsed: {:.3}s", elapsed.as_secs_f64());
}
