//! Deadlines and delays.

use std::future::{Future, IntoFuture};
use std::panic;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// The error returned when a future misses its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("operation timed out after {duration:?}")]
pub struct TimeoutError {
    /// The deadline that was exceeded.
    pub duration: Duration,
}

/// Waits for `future`, giving up after `duration`.
///
/// Whichever finishes first decides the outcome. When the deadline wins,
/// `future` is dropped and does not run any further; use
/// [`timeout_detached`] to let it keep running.
///
/// # Errors
///
/// Returns [`TimeoutError`] when `duration` elapses first.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fp_pack::async_util::{delay, timeout};
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let fast = timeout(Duration::from_millis(50), async { 7 }).await;
/// assert_eq!(fast, Ok(7));
///
/// let slow = timeout(Duration::from_millis(50), delay(Duration::from_secs(1))).await;
/// assert_eq!(slow.unwrap_err().duration, Duration::from_millis(50));
/// # }
/// ```
pub async fn timeout<F>(duration: Duration, future: F) -> Result<F::Output, TimeoutError>
where
    F: IntoFuture,
{
    tokio::time::timeout(duration, future).await.map_err(|_| {
        debug!(?duration, "timeout expired");
        TimeoutError { duration }
    })
}

/// Like [`timeout`], but `future` keeps running on its own Tokio task after
/// the deadline passes.
///
/// Its eventual output is discarded. A panic inside `future` before the
/// deadline is resumed on the caller.
///
/// # Errors
///
/// Returns [`TimeoutError`] when `duration` elapses first.
///
/// # Panics
///
/// Panics when called outside a Tokio runtime.
pub async fn timeout_detached<F>(duration: Duration, future: F) -> Result<F::Output, TimeoutError>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let task = tokio::spawn(future);
    match tokio::time::timeout(duration, task).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(join_error)) => match join_error.try_into_panic() {
            Ok(payload) => panic::resume_unwind(payload),
            // only reachable while the runtime is shutting down
            Err(_) => Err(TimeoutError { duration }),
        },
        Err(_) => {
            debug!(?duration, "detached timeout expired; task keeps running");
            Err(TimeoutError { duration })
        }
    }
}

/// Completes after `duration`.
pub async fn delay(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_error_display() {
        let error = TimeoutError {
            duration: Duration::from_millis(250),
        };
        assert_eq!(error.to_string(), "operation timed out after 250ms");
    }
}
