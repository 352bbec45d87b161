//! Rate limiting with a leading call and one trailing call per window.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use tracing::debug;

struct ThrottleState<T> {
    last_run: Option<Instant>,
    pending: Option<T>,
    timer: Option<JoinHandle<()>>,
    generation: u64,
}

struct ThrottleShared<T, F> {
    function: F,
    wait: Duration,
    state: Mutex<ThrottleState<T>>,
}

impl<T, F> ThrottleShared<T, F>
where
    F: Fn(T),
{
    fn fire_trailing(&self, generation: u64) {
        let pending = {
            let mut state = self.state.lock();
            if state.generation != generation {
                return;
            }
            state.timer = None;
            let pending = state.pending.take();
            if pending.is_some() {
                state.last_run = Some(Instant::now());
            }
            pending
        };

        if let Some(argument) = pending {
            debug!(wait = ?self.wait, "throttle firing trailing call");
            (self.function)(argument);
        }
    }
}

/// A throttled function. Created by [`throttle`].
///
/// Cloning a `Throttled` shares the same window.
pub struct Throttled<T, F> {
    shared: Arc<ThrottleShared<T, F>>,
}

impl<T, F> Clone for Throttled<T, F> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, F> fmt::Debug for Throttled<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Throttled")
            .field("wait", &self.shared.wait)
            .finish_non_exhaustive()
    }
}

/// Limits `function` to one call per `wait`.
///
/// The first call in a quiet period runs immediately, on the caller's
/// thread. Calls made while the window is open only record their argument,
/// replacing any earlier recorded one; when the window closes the function
/// runs once more, on a Tokio task, with the most recent argument.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::time::Duration;
/// use fp_pack::async_util::throttle;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let last = Arc::new(AtomicI32::new(0));
/// let observer = Arc::clone(&last);
/// let update = throttle(
///     move |value: i32| observer.store(value, Ordering::SeqCst),
///     Duration::from_millis(20),
/// );
///
/// update.call(1);
/// update.call(2);
/// update.call(3);
/// assert_eq!(last.load(Ordering::SeqCst), 1);
///
/// tokio::time::sleep(Duration::from_millis(40)).await;
/// assert_eq!(last.load(Ordering::SeqCst), 3);
/// # }
/// ```
pub fn throttle<T, F>(function: F, wait: Duration) -> Throttled<T, F>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    Throttled {
        shared: Arc::new(ThrottleShared {
            function,
            wait,
            state: Mutex::new(ThrottleState {
                last_run: None,
                pending: None,
                timer: None,
                generation: 0,
            }),
        }),
    }
}

impl<T, F> Throttled<T, F>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    /// Calls the throttled function.
    ///
    /// # Panics
    ///
    /// Panics when a trailing call has to be scheduled outside a Tokio
    /// runtime.
    pub fn call(&self, argument: T) {
        let now = Instant::now();
        let mut state = self.shared.state.lock();

        let remaining = state
            .last_run
            .map_or(Duration::ZERO, |last| self.shared.wait.saturating_sub(now - last));

        if remaining.is_zero() && state.timer.is_none() {
            state.last_run = Some(now);
            drop(state);
            (self.shared.function)(argument);
            return;
        }

        state.pending = Some(argument);
        if state.timer.is_none() {
            debug!(?remaining, "throttle scheduled trailing call");
            state.generation += 1;
            let generation = state.generation;
            let shared = Arc::clone(&self.shared);
            state.timer = Some(tokio::spawn(async move {
                sleep(remaining).await;
                shared.fire_trailing(generation);
            }));
        }
    }

    /// Drops a scheduled trailing call, if any.
    pub fn cancel(&self) {
        let mut state = self.shared.state.lock();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.pending = None;
        state.generation += 1;
    }

    /// Returns `true` while a trailing call is scheduled.
    pub fn is_pending(&self) -> bool {
        self.shared.state.lock().pending.is_some()
    }
}
