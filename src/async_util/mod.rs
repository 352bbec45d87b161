//! Timer-driven helpers on top of Tokio.
//!
//! - [`pipe_async!`](crate::pipe_async!): pipelines with awaited steps
//! - [`throttle`]: at most one call per window, with a trailing call
//! - [`debounce`] / [`debounce_with`]: one call after a burst of calls
//! - [`timeout`] / [`timeout_detached`]: race a future against a deadline
//! - [`delay`] and [`retry`]
//!
//! Throttled and debounced functions keep their state behind a mutex and
//! schedule trailing calls on Tokio tasks, so they must be used inside a
//! Tokio runtime. Events are reported through `tracing` at debug level.

mod debounce;
mod pipe_async_macro;
mod retry;
mod throttle;
mod timeout;

pub use debounce::{DebounceOptions, Debounced, debounce, debounce_with};
pub use retry::{RetryError, retry};
pub use throttle::{Throttled, throttle};
pub use timeout::{TimeoutError, delay, timeout, timeout_detached};

pub use crate::pipe_async;
