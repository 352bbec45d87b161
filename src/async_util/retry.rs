//! Retrying fallible asynchronous work.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// The error returned when every attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("all {attempts} attempts failed, last error: {last}")]
pub struct RetryError<E> {
    /// How many attempts were made.
    pub attempts: usize,
    /// The error of the final attempt.
    pub last: E,
}

impl<E> RetryError<E> {
    /// Returns the error of the final attempt.
    pub fn into_last(self) -> E {
        self.last
    }
}

/// Runs the future produced by `factory` until it succeeds, at most
/// `attempts` times, sleeping `pause` between attempts.
///
/// A fresh future is built for every attempt. An `attempts` of zero is
/// treated as one.
///
/// # Errors
///
/// Returns [`RetryError`] carrying the last error when no attempt
/// succeeds.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::time::Duration;
/// use fp_pack::async_util::retry;
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let calls = Cell::new(0);
/// let result = retry(5, Duration::from_millis(10), || {
///     calls.set(calls.get() + 1);
///     let attempt = calls.get();
///     async move { if attempt < 3 { Err("busy") } else { Ok(attempt) } }
/// })
/// .await;
///
/// assert_eq!(result, Ok(3));
/// # }
/// ```
pub async fn retry<T, E, F, Fut>(
    attempts: usize,
    pause: Duration,
    mut factory: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match factory().await {
            Ok(value) => return Ok(value),
            Err(last) if attempt >= attempts => {
                debug!(attempts, "retry gave up");
                return Err(RetryError { attempts, last });
            }
            Err(_) => {
                debug!(attempt, attempts, ?pause, "attempt failed, retrying");
                tokio::time::sleep(pause).await;
                attempt += 1;
            }
        }
    }
}
