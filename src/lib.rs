//! # fp-pack
//!
//! Small, independent functional-programming helpers for Rust.
//!
//! ## Overview
//!
//! - **Function Composition**: `pipe!`, `pipe_fn!`, `compose!`, `curry!`,
//!   the `flip` family and the `memoize` family
//! - **Lazy Sequences**: `range`, `map`, `filter`, `take`, `flatten`,
//!   `flatten_deep` and friends, working uniformly over synchronous
//!   iterators and asynchronous streams
//! - **SideEffect**: a value-level signal that stops a pipeline without
//!   running the deferred work
//! - **Async Helpers**: `pipe_async!`, `throttle`, `debounce`, `timeout`,
//!   `delay`, `retry`
//!
//! ## Feature Flags
//!
//! - `compose`: Function composition utilities and the `SideEffect` container
//! - `stream`: Lazy sequences (pulls in `futures` for the async side)
//! - `async`: Timer-driven helpers on top of tokio
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use fp_pack::prelude::*;
//!
//! let total = pipe!(
//!     to_array(filter(range(0, 10), |n: &i64| n % 2 == 0)),
//!     |evens: Vec<i64>| to_array(map(evens, |n: i64| n * 10)),
//!     |tens: Vec<i64>| tens.into_iter().sum::<i64>()
//! );
//! assert_eq!(total, 200);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used functions, types and macros.
///
/// # Usage
///
/// ```rust
/// use fp_pack::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "compose")]
    pub use crate::compose::*;

    #[cfg(feature = "compose")]
    pub use crate::side_effect::*;

    #[cfg(feature = "stream")]
    pub use crate::stream::*;

    #[cfg(feature = "async")]
    pub use crate::async_util::*;

    pub use crate::error::SequenceError;
}

pub mod error;

#[cfg(feature = "compose")]
pub mod compose;

#[cfg(feature = "compose")]
pub use fp_pack_derive::curry;

#[cfg(feature = "compose")]
pub mod side_effect;

#[cfg(feature = "stream")]
pub mod stream;

#[cfg(feature = "async")]
pub mod async_util;
