use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use paytrust_core::retry::RetryPolicy;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn backoff_delays_follow_two_to_the_n() {
    let policy = RetryPolicy::new();
    let calls = AtomicU32::new(0);
    let mut observed_gaps = Vec::new();
    let mut last = Instant::now();

    let _: Result<(), String> = policy
        .execute(|| {
            let now = Instant::now();
            observed_gaps.push(now.duration_since(last));
            last = now;
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("always fails".to_string()) }
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 4);
    // First call has no preceding delay; the three retries wait 2s, 4s, 8s.
    assert_eq!(observed_gaps[1], Duration::from_secs(2));
    assert_eq!(observed_gaps[2], Duration::from_secs(4));
    assert_eq!(observed_gaps[3], Duration::from_secs(8));
}

#[tokio::test(start_paused = true)]
async fn never_retries_past_three_times() {
    let policy = RetryPolicy::new();
    let calls = AtomicU32::new(0);

    let result: Result<(), String> = policy
        .execute(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("nope".to_string()) }
        })
        .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}
