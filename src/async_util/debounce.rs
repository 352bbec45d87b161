//! Debouncing: run once after calls stop arriving.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

/// Which edges of a burst of calls invoke the function.
///
/// The default is trailing-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceOptions {
    /// Run on the first call of a burst.
    pub leading: bool,
    /// Run after the burst, with the latest argument.
    pub trailing: bool,
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self {
            leading: false,
            trailing: true,
        }
    }
}

impl DebounceOptions {
    /// Leading edge only.
    #[must_use]
    pub const fn leading() -> Self {
        Self {
            leading: true,
            trailing: false,
        }
    }

    /// Both edges; the trailing call only happens when the burst had more
    /// than one call.
    #[must_use]
    pub const fn both() -> Self {
        Self {
            leading: true,
            trailing: true,
        }
    }
}

struct DebounceState<T> {
    pending: Option<T>,
    timer: Option<JoinHandle<()>>,
    generation: u64,
}

struct DebounceShared<T, F> {
    function: F,
    wait: Duration,
    options: DebounceOptions,
    state: Mutex<DebounceState<T>>,
}

impl<T, F> DebounceShared<T, F>
where
    F: Fn(T),
{
    fn close_window(&self, generation: u64) {
        let pending = {
            let mut state = self.state.lock();
            if state.generation != generation {
                return;
            }
            state.timer = None;
            state.pending.take()
        };

        if let Some(argument) = pending {
            debug!(wait = ?self.wait, "debounce firing trailing call");
            (self.function)(argument);
        }
    }
}

/// A debounced function. Created by [`debounce`] and [`debounce_with`].
pub struct Debounced<T, F> {
    shared: Arc<DebounceShared<T, F>>,
}

impl<T, F> Clone for Debounced<T, F> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, F> fmt::Debug for Debounced<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Debounced")
            .field("wait", &self.shared.wait)
            .field("options", &self.shared.options)
            .finish_non_exhaustive()
    }
}

/// Delays `function` until `wait` has passed without another call.
///
/// Every call restarts the quiet period and replaces the recorded
/// argument. When the period finally elapses the function runs once, on a
/// Tokio task, with the latest argument.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
/// use fp_pack::async_util::debounce;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let search = debounce(
///     move |query: &'static str| sink.lock().unwrap().push(query),
///     Duration::from_millis(20),
/// );
///
/// search.call("r");
/// search.call("ru");
/// search.call("rust");
/// tokio::time::sleep(Duration::from_millis(40)).await;
///
/// assert_eq!(*seen.lock().unwrap(), vec!["rust"]);
/// # }
/// ```
pub fn debounce<T, F>(function: F, wait: Duration) -> Debounced<T, F>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    debounce_with(function, wait, DebounceOptions::default())
}

/// Like [`debounce`], choosing the edges that invoke the function.
///
/// With `leading` set, the first call of a burst runs immediately on the
/// caller's thread. With `trailing` set, the latest argument of the rest of
/// the burst is used once the quiet period elapses.
pub fn debounce_with<T, F>(function: F, wait: Duration, options: DebounceOptions) -> Debounced<T, F>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    Debounced {
        shared: Arc::new(DebounceShared {
            function,
            wait,
            options,
            state: Mutex::new(DebounceState {
                pending: None,
                timer: None,
                generation: 0,
            }),
        }),
    }
}

impl<T, F> Debounced<T, F>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    /// Calls the debounced function.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn call(&self, argument: T) {
        let mut state = self.shared.state.lock();

        let idle = match state.timer.take() {
            Some(timer) => {
                timer.abort();
                false
            }
            None => true,
        };

        let run_now = self.shared.options.leading && idle;
        let leading_argument = if run_now {
            state.pending = None;
            Some(argument)
        } else {
            if self.shared.options.trailing {
                state.pending = Some(argument);
            }
            None
        };

        state.generation += 1;
        let generation = state.generation;
        let shared = Arc::clone(&self.shared);
        let wait = self.shared.wait;
        state.timer = Some(tokio::spawn(async move {
            sleep(wait).await;
            shared.close_window(generation);
        }));
        drop(state);

        if let Some(argument) = leading_argument {
            debug!(?wait, "debounce firing leading call");
            (self.shared.function)(argument);
        }
    }

    /// Drops the recorded argument and ends the current quiet period
    /// without calling the function.
    pub fn cancel(&self) {
        let mut state = self.shared.state.lock();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.pending = None;
        state.generation += 1;
    }

    /// Returns `true` while a trailing call is waiting for the quiet period
    /// to elapse.
    pub fn is_pending(&self) -> bool {
        self.shared.state.lock().pending.is_some()
    }
}
