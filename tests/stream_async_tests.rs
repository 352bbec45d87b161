//! Tests for lazy sequences over asynchronous inputs.

#![cfg(feature = "stream")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use fp_pack::stream::{
    await_value, chunk, concat, filter, flat_map, flatten, is_async_input, is_iterable, map,
    range, skip, skip_while, take, take_while, to_array, to_async, zip,
};
use futures::FutureExt;
use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use rstest::rstest;

// =============================================================================
// Classification and conversion
// =============================================================================

#[rstest]
fn streams_and_futures_are_async_inputs() {
    let source = stream::iter(vec![1, 2]);
    assert!(is_async_input(&source));
    assert!(!is_iterable(&source));

    let pending = async { vec![1, 2] };
    assert!(is_async_input(&pending));
}

#[tokio::test]
async fn to_async_lifts_iterables() {
    let lifted = to_async(range(0, 3));
    assert_eq!(lifted.collect::<Vec<_>>().await, vec![0, 1, 2]);
}

#[tokio::test]
async fn to_async_passes_streams_through() {
    let source = stream::iter(vec!['x', 'y']);
    assert_eq!(to_array(to_async(source)).await, vec!['x', 'y']);
}

// =============================================================================
// Element-wise adaptors
// =============================================================================

#[tokio::test]
async fn map_filter_take_over_stream() {
    let source = to_async(range(0, 100));
    let doubled = map(source, |n: i64| n * 2);
    let multiples_of_three = filter(doubled, |n: &i64| n % 3 == 0);
    assert_eq!(to_array(take(multiples_of_three, 4)).await, vec![0, 6, 12, 18]);
}

#[tokio::test]
async fn take_stops_polling_source() {
    let polled = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&polled);
    let source = stream::iter(0..).inspect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(to_array(take(source, 3)).await, vec![0, 1, 2]);
    assert_eq!(polled.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn skip_and_while_adaptors_over_stream() {
    let source = stream::iter(vec![2, 4, 5, 6, 8]);
    assert_eq!(to_array(skip(source, 3)).await, vec![6, 8]);

    let source = stream::iter(vec![2, 4, 5, 6, 8]);
    assert_eq!(to_array(take_while(source, |n: &i32| n % 2 == 0)).await, vec![2, 4]);

    let source = stream::iter(vec![2, 4, 5, 6, 8]);
    assert_eq!(to_array(skip_while(source, |n: &i32| n % 2 == 0)).await, vec![5, 6, 8]);
}

#[tokio::test(start_paused = true)]
async fn adaptors_wait_for_pending_sources() {
    let source = stream::iter(vec![30_u64, 10, 20]).then(|millis| async move {
        tokio::time::sleep(Duration::from_millis(millis)).await;
        millis
    });
    let labelled = map(source, |millis: u64| format!("{millis}ms"));
    assert_eq!(to_array(labelled).await, vec!["30ms", "10ms", "20ms"]);
}

// =============================================================================
// Future inputs
// =============================================================================

#[tokio::test]
async fn future_of_iterable_is_awaited_once() {
    let evaluations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evaluations);
    let pending = async move {
        counter.fetch_add(1, Ordering::SeqCst);
        vec![3, 1, 2]
    };

    let scaled = map(pending, |n: i32| n * 100);
    assert_eq!(evaluations.load(Ordering::SeqCst), 0);
    assert_eq!(to_array(scaled).await, vec![300, 100, 200]);
    assert_eq!(evaluations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn await_value_resolves_in_order() {
    let pending: Vec<BoxFuture<'static, &str>> = vec![
        async {
            tokio::task::yield_now().await;
            "first"
        }
        .boxed(),
        async { "second" }.boxed(),
    ];
    assert_eq!(to_array(await_value(pending)).await, vec!["first", "second"]);
}

// =============================================================================
// Flattening and combining
// =============================================================================

#[tokio::test]
async fn flatten_and_flat_map_over_stream() {
    let rows = stream::iter(vec![vec![1, 2], vec![], vec![3]]);
    assert_eq!(to_array(flatten(rows)).await, vec![1, 2, 3]);

    let words = stream::iter(vec!["hi", "yo"]);
    let letters = flat_map(words, |word: &str| word.chars().rev().collect::<Vec<_>>());
    assert_eq!(to_array(letters).await, vec!['i', 'h', 'o', 'y']);
}

#[tokio::test]
async fn chunk_zip_concat_over_stream() {
    let groups = chunk(stream::iter(1..=5), 2).unwrap();
    assert_eq!(to_array(groups).await, vec![vec![1, 2], vec![3, 4], vec![5]]);

    let pairs = zip(stream::iter(vec!['a', 'b', 'c']), to_async(range(0, 2)));
    assert_eq!(to_array(pairs).await, vec![('a', 0), ('b', 1)]);

    let joined = concat(stream::iter(vec![1]), async { vec![2, 3] });
    assert_eq!(to_array(joined).await, vec![1, 2, 3]);
}
