//! Classification of lazy sequence inputs.
//!
//! Every sequence function accepts one of three input shapes and decides,
//! once and at compile time, which of two code paths it takes:
//!
//! | Input shape                              | Marker          | Output      |
//! |------------------------------------------|-----------------|-------------|
//! | any [`IntoIterator`]                     | [`SyncInput`]   | `Iterator`  |
//! | any [`Stream`]                           | [`AsyncInput`]  | `Stream`    |
//! | a [`Future`] whose output is iterable    | [`FutureInput`] | `Stream`    |
//!
//! The marker type parameter of [`IntoLazy`] is inferred by the compiler,
//! so callers never name it. A type that fits none of the shapes is rejected
//! at compile time.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures::stream::{self, Collect, Iter, Stream, StreamExt};
use pin_project_lite::pin_project;

/// Marker for synchronous iterable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncInput;

/// Marker for asynchronous stream inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsyncInput;

/// Marker for futures resolving to an iterable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FutureInput;

/// Which of the two code paths an input takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Pulled synchronously through [`Iterator::next`].
    Sync,
    /// Polled asynchronously through [`Stream::poll_next`].
    Async,
}

/// Conversion of a sequence input into its lazy source.
///
/// The type parameter `M` is one of [`SyncInput`], [`AsyncInput`] or
/// [`FutureInput`] and only exists so the three blanket implementations do
/// not overlap.
pub trait IntoLazy<M> {
    /// The element type of the sequence.
    type Item;

    /// The source the adaptors pull from: an `Iterator` for synchronous
    /// inputs, a `Stream` otherwise.
    type Source;

    /// The input viewed as a `Stream`.
    type Stream: Stream<Item = Self::Item>;

    /// The result of [`to_array`]: a `Vec` for synchronous inputs, a future
    /// resolving to a `Vec` otherwise.
    type Array;

    /// The code path this input takes.
    const KIND: InputKind;

    /// Converts the input into its lazy source.
    fn into_lazy(self) -> Self::Source;

    /// Converts the input into a `Stream`.
    fn into_stream(self) -> Self::Stream;

    /// Drains the input into a `Vec`.
    fn into_array(self) -> Self::Array;
}

impl<I: IntoIterator> IntoLazy<SyncInput> for I {
    type Item = I::Item;
    type Source = I::IntoIter;
    type Stream = Iter<I::IntoIter>;
    type Array = Vec<I::Item>;

    const KIND: InputKind = InputKind::Sync;

    fn into_lazy(self) -> Self::Source {
        self.into_iter()
    }

    fn into_stream(self) -> Self::Stream {
        stream::iter(self)
    }

    fn into_array(self) -> Self::Array {
        self.into_iter().collect()
    }
}

impl<S: Stream> IntoLazy<AsyncInput> for S {
    type Item = S::Item;
    type Source = S;
    type Stream = S;
    type Array = Collect<S, Vec<S::Item>>;

    const KIND: InputKind = InputKind::Async;

    fn into_lazy(self) -> Self::Source {
        self
    }

    fn into_stream(self) -> Self::Stream {
        self
    }

    fn into_array(self) -> Self::Array {
        self.collect()
    }
}

impl<F> IntoLazy<FutureInput> for F
where
    F: Future,
    F::Output: IntoIterator,
{
    type Item = <F::Output as IntoIterator>::Item;
    type Source = FromFuture<F, <F::Output as IntoIterator>::IntoIter>;
    type Stream = FromFuture<F, <F::Output as IntoIterator>::IntoIter>;
    type Array = Collect<Self::Stream, Vec<Self::Item>>;

    const KIND: InputKind = InputKind::Async;

    fn into_lazy(self) -> Self::Source {
        FromFuture::new(self)
    }

    fn into_stream(self) -> Self::Stream {
        FromFuture::new(self)
    }

    fn into_array(self) -> Self::Array {
        FromFuture::new(self).collect()
    }
}

/// Returns `true` when the input is consumed asynchronously.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::is_async_input;
/// use futures::stream;
///
/// assert!(!is_async_input(&vec![1, 2, 3]));
/// assert!(is_async_input(&stream::iter(vec![1, 2, 3])));
/// assert!(is_async_input(&async { vec![1, 2, 3] }));
/// ```
pub fn is_async_input<M, S: IntoLazy<M>>(_input: &S) -> bool {
    S::KIND == InputKind::Async
}

/// Returns `true` when the input is a plain synchronous iterable.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::is_iterable;
/// use futures::stream;
///
/// assert!(is_iterable(&[1, 2, 3]));
/// assert!(is_iterable(&Some(1)));
/// assert!(!is_iterable(&stream::iter(vec![1])));
/// ```
pub fn is_iterable<M, S: IntoLazy<M>>(_input: &S) -> bool {
    S::KIND == InputKind::Sync
}

/// Converts any sequence input into a `Stream`.
///
/// Synchronous iterables become always-ready streams, streams pass through
/// unchanged, and futures of iterables yield the iterable's elements once
/// the future resolves.
pub fn to_async<M, S: IntoLazy<M>>(input: S) -> S::Stream {
    input.into_stream()
}

/// Drains a sequence into a `Vec`.
///
/// Synchronous inputs are collected immediately. Asynchronous inputs return
/// a future that resolves to the collected `Vec`.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{range, to_array};
///
/// assert_eq!(to_array(range(0, 3)), vec![0, 1, 2]);
/// ```
pub fn to_array<M, S: IntoLazy<M>>(input: S) -> S::Array {
    input.into_array()
}

/// Awaits every element of a sequence of futures, strictly in order.
///
/// The next future is not pulled from the source until the previous one
/// has resolved.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{await_value, to_array};
/// use futures::future;
///
/// # futures::executor::block_on(async {
/// let pending = vec![future::ready(1), future::ready(2)];
/// assert_eq!(to_array(await_value(pending)).await, vec![1, 2]);
/// # });
/// ```
pub fn await_value<M, S>(input: S) -> AwaitValue<S::Stream, S::Item>
where
    S: IntoLazy<M>,
    S::Item: Future,
{
    AwaitValue {
        source: input.into_stream(),
        pending: None,
    }
}

pin_project! {
    /// Stream adapter for a future that resolves to an iterable.
    ///
    /// Created when a [`FutureInput`] is converted to its source.
    #[must_use = "streams do nothing unless polled"]
    pub struct FromFuture<F, I> {
        #[pin]
        future: Option<F>,
        elements: Option<I>,
    }
}

impl<F, I> FromFuture<F, I> {
    const fn new(future: F) -> Self {
        Self {
            future: Some(future),
            elements: None,
        }
    }
}

impl<F, I> Stream for FromFuture<F, I>
where
    F: Future,
    F::Output: IntoIterator<IntoIter = I>,
    I: Iterator,
{
    type Item = I::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if let Some(future) = this.future.as_mut().as_pin_mut() {
            let resolved = ready!(future.poll(context));
            this.future.set(None);
            *this.elements = Some(resolved.into_iter());
        }

        Poll::Ready(this.elements.as_mut().and_then(Iterator::next))
    }
}

pin_project! {
    /// Stream of the outputs of a sequence of futures.
    ///
    /// Created by [`await_value`].
    #[must_use = "streams do nothing unless polled"]
    pub struct AwaitValue<S, Fut> {
        #[pin]
        source: S,
        #[pin]
        pending: Option<Fut>,
    }
}

impl<S, Fut> Stream for AwaitValue<S, Fut>
where
    S: Stream<Item = Fut>,
    Fut: Future,
{
    type Item = Fut::Output;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(future) = this.pending.as_mut().as_pin_mut() {
                let output = ready!(future.poll(context));
                this.pending.set(None);
                return Poll::Ready(Some(output));
            }

            match ready!(this.source.as_mut().poll_next(context)) {
                Some(future) => this.pending.set(Some(future)),
                None => return Poll::Ready(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_from_future_yields_nothing_until_resolved() {
        let mut source = Box::pin(FromFuture::new(async { vec![1, 2] }));
        let first = block_on(source.next());
        assert_eq!(first, Some(1));
        assert_eq!(block_on(source.next()), Some(2));
        assert_eq!(block_on(source.next()), None);
    }

    #[test]
    fn test_classification_kinds() {
        assert_eq!(<Vec<i32> as IntoLazy<SyncInput>>::KIND, InputKind::Sync);
        assert_eq!(
            <Iter<std::vec::IntoIter<i32>> as IntoLazy<AsyncInput>>::KIND,
            InputKind::Async
        );
    }
}
