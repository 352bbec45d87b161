//! Lazy sequences over synchronous and asynchronous inputs.
//!
//! Every function in this module takes its input first and returns a lazy
//! adaptor. Nothing is pulled from the input until the adaptor is pulled,
//! and only as many elements are pulled as are needed.
//!
//! Each adaptor is a single type with two faces:
//!
//! - fed an [`IntoIterator`], it is an [`Iterator`] and runs synchronously;
//! - fed a [`Stream`](futures::Stream) or a future resolving to an
//!   iterable, it is a `Stream` and must be awaited.
//!
//! The choice is made at compile time from the input type (see
//! [`IntoLazy`]), so the same pipeline code serves both worlds.
//!
//! # Examples
//!
//! Synchronous input:
//!
//! ```rust
//! use fp_pack::stream::{filter, map, range_from, take, to_array};
//!
//! let squares = map(range_from(1), |n: i64| n * n);
//! let even = filter(squares, |n: &i64| n % 2 == 0);
//! assert_eq!(to_array(take(even, 3)), vec![4, 16, 36]);
//! ```
//!
//! Asynchronous input:
//!
//! ```rust
//! use fp_pack::stream::{map, take, to_array};
//! use futures::stream;
//!
//! # futures::executor::block_on(async {
//! let source = stream::iter(vec![1, 2, 3, 4]);
//! let doubled = take(map(source, |n: i32| n * 2), 2);
//! assert_eq!(to_array(doubled).await, vec![2, 4]);
//! # });
//! ```

mod adaptors;
mod combine;
mod flatten;
mod input;
mod range;

pub use adaptors::{
    Filter, Map, Skip, SkipWhile, Take, TakeWhile, filter, map, skip, skip_while, take,
    take_while,
};
pub use combine::{Chunk, Concat, Zip, chunk, concat, zip};
pub use flatten::{
    FlatMap, Flatten, FlattenDeep, Nest, Nested, Node, flat_map, flatten, flatten_deep,
};
pub use input::{
    AsyncInput, AwaitValue, FromFuture, FutureInput, InputKind, IntoLazy, SyncInput,
    await_value, is_async_input, is_iterable, to_array, to_async,
};
pub use range::{Range, range, range_by, range_from};

pub use crate::nested;
