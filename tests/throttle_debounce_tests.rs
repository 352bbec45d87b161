//! Tests for `throttle` and `debounce` on a paused Tokio clock.

#![cfg(feature = "async")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use fp_pack::async_util::{DebounceOptions, debounce, debounce_with, throttle};
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

const WAIT: Duration = Duration::from_millis(100);

#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<Mutex<Vec<i32>>>,
}

impl Recorder {
    fn sink(&self) -> impl Fn(i32) + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        move |value| calls.lock().unwrap().push(value)
    }

    fn calls(&self) -> Vec<i32> {
        self.calls.lock().unwrap().clone()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn millis(value: u64) -> Duration {
    Duration::from_millis(value)
}

// =============================================================================
// throttle
// =============================================================================

#[tokio::test(start_paused = true)]
async fn throttle_runs_first_call_immediately() {
    let recorder = Recorder::default();
    let throttled = throttle(recorder.sink(), WAIT);

    throttled.call(1);
    assert_eq!(recorder.calls(), vec![1]);
    assert!(!throttled.is_pending());
}

#[tokio::test(start_paused = true)]
async fn throttle_trailing_call_uses_latest_argument() {
    let recorder = Recorder::default();
    let throttled = throttle(recorder.sink(), WAIT);

    throttled.call(1);
    throttled.call(2);
    throttled.call(3);
    assert_eq!(recorder.calls(), vec![1]);
    assert!(throttled.is_pending());

    sleep(millis(110)).await;
    assert_eq!(recorder.calls(), vec![1, 3]);
    assert!(!throttled.is_pending());
}

#[tokio::test(start_paused = true)]
async fn throttle_allows_one_call_per_window() {
    init_tracing();
    let recorder = Recorder::default();
    let throttled = throttle(recorder.sink(), WAIT);

    for step in 0..10 {
        throttled.call(step * 35);
        sleep(millis(35)).await;
    }
    sleep(millis(150)).await;

    assert_eq!(recorder.calls(), vec![0, 70, 175, 280, 315]);
}

#[tokio::test(start_paused = true)]
async fn throttle_runs_immediately_after_quiet_window() {
    let recorder = Recorder::default();
    let throttled = throttle(recorder.sink(), WAIT);

    throttled.call(1);
    sleep(millis(150)).await;
    throttled.call(2);
    assert_eq!(recorder.calls(), vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn throttle_cancel_drops_trailing_call() {
    let recorder = Recorder::default();
    let throttled = throttle(recorder.sink(), WAIT);

    throttled.call(1);
    throttled.call(2);
    throttled.cancel();
    assert!(!throttled.is_pending());

    sleep(millis(200)).await;
    assert_eq!(recorder.calls(), vec![1]);
}

#[tokio::test(start_paused = true)]
async fn throttle_clones_share_one_window() {
    let recorder = Recorder::default();
    let throttled = throttle(recorder.sink(), WAIT);
    let other = throttled.clone();

    throttled.call(1);
    other.call(2);
    assert_eq!(recorder.calls(), vec![1]);

    sleep(millis(110)).await;
    assert_eq!(recorder.calls(), vec![1, 2]);
}

// =============================================================================
// debounce
// =============================================================================

#[tokio::test(start_paused = true)]
async fn debounce_runs_once_after_burst() {
    let recorder = Recorder::default();
    let debounced = debounce(recorder.sink(), WAIT);

    debounced.call(1);
    debounced.call(2);
    debounced.call(3);
    assert!(recorder.calls().is_empty());
    assert!(debounced.is_pending());

    sleep(millis(110)).await;
    assert_eq!(recorder.calls(), vec![3]);
    assert!(!debounced.is_pending());
}

#[tokio::test(start_paused = true)]
async fn debounce_each_call_restarts_quiet_period() {
    let recorder = Recorder::default();
    let debounced = debounce(recorder.sink(), WAIT);

    debounced.call(1);
    sleep(millis(60)).await;
    debounced.call(2);
    sleep(millis(60)).await;
    assert!(recorder.calls().is_empty());

    sleep(millis(50)).await;
    assert_eq!(recorder.calls(), vec![2]);
}

#[tokio::test(start_paused = true)]
async fn debounce_separate_bursts_each_fire() {
    let recorder = Recorder::default();
    let debounced = debounce(recorder.sink(), WAIT);

    debounced.call(1);
    sleep(millis(150)).await;
    debounced.call(2);
    sleep(millis(150)).await;

    assert_eq!(recorder.calls(), vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn debounce_leading_only() {
    let recorder = Recorder::default();
    let debounced = debounce_with(recorder.sink(), WAIT, DebounceOptions::leading());

    debounced.call(1);
    debounced.call(2);
    assert_eq!(recorder.calls(), vec![1]);

    sleep(millis(150)).await;
    assert_eq!(recorder.calls(), vec![1]);

    debounced.call(3);
    assert_eq!(recorder.calls(), vec![1, 3]);
}

#[tokio::test(start_paused = true)]
async fn debounce_both_edges() {
    init_tracing();
    let recorder = Recorder::default();
    let debounced = debounce_with(recorder.sink(), WAIT, DebounceOptions::both());

    debounced.call(1);
    sleep(millis(150)).await;
    assert_eq!(recorder.calls(), vec![1]);

    debounced.call(2);
    debounced.call(3);
    debounced.call(4);
    assert_eq!(recorder.calls(), vec![1, 2]);

    sleep(millis(150)).await;
    assert_eq!(recorder.calls(), vec![1, 2, 4]);
}

#[tokio::test(start_paused = true)]
async fn debounce_cancel_drops_pending_call() {
    let recorder = Recorder::default();
    let debounced = debounce(recorder.sink(), WAIT);

    debounced.call(1);
    debounced.cancel();
    assert!(!debounced.is_pending());

    sleep(millis(200)).await;
    assert!(recorder.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn debounce_default_options_are_trailing_only() {
    assert_eq!(
        DebounceOptions::default(),
        DebounceOptions {
            leading: false,
            trailing: true
        }
    );
}
