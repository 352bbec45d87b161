//! Element-wise lazy adaptors: `map`, `filter`, `take`, `skip`,
//! `take_while` and `skip_while`.
//!
//! Each adaptor is a single struct implementing [`Iterator`] when its source
//! is an iterator and [`Stream`] when its source is a stream. Nothing is
//! pulled from the source until the adaptor itself is pulled.

use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures::stream::Stream;
use pin_project_lite::pin_project;

use super::input::IntoLazy;

// =============================================================================
// map
// =============================================================================

pin_project! {
    /// Lazy sequence transforming each element. Created by [`map`].
    #[must_use = "lazy sequences do nothing unless consumed"]
    pub struct Map<S, F> {
        #[pin]
        source: S,
        function: F,
    }
}

/// Applies `function` to each element as it is pulled.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{map, range, to_array};
///
/// assert_eq!(to_array(map(range(1, 4), |n: i64| n * n)), vec![1, 4, 9]);
/// ```
pub fn map<M, S, F, B>(input: S, function: F) -> Map<S::Source, F>
where
    S: IntoLazy<M>,
    F: FnMut(S::Item) -> B,
{
    Map {
        source: input.into_lazy(),
        function,
    }
}

impl<S, F, B> Iterator for Map<S, F>
where
    S: Iterator,
    F: FnMut(S::Item) -> B,
{
    type Item = B;

    fn next(&mut self) -> Option<B> {
        self.source.next().map(&mut self.function)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl<S, F, B> Stream for Map<S, F>
where
    S: Stream,
    F: FnMut(S::Item) -> B,
{
    type Item = B;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<B>> {
        let this = self.project();
        this.source
            .poll_next(context)
            .map(|element| element.map(this.function))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

// =============================================================================
// filter
// =============================================================================

pin_project! {
    /// Lazy sequence keeping the elements that satisfy a predicate.
    /// Created by [`filter`].
    #[must_use = "lazy sequences do nothing unless consumed"]
    pub struct Filter<S, P> {
        #[pin]
        source: S,
        predicate: P,
    }
}

/// Keeps only the elements for which `predicate` returns `true`.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{filter, range, to_array};
///
/// let odd = filter(range(0, 6), |n: &i64| n % 2 == 1);
/// assert_eq!(to_array(odd), vec![1, 3, 5]);
/// ```
pub fn filter<M, S, P>(input: S, predicate: P) -> Filter<S::Source, P>
where
    S: IntoLazy<M>,
    P: FnMut(&S::Item) -> bool,
{
    Filter {
        source: input.into_lazy(),
        predicate,
    }
}

impl<S, P> Iterator for Filter<S, P>
where
    S: Iterator,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        self.source.find(&mut self.predicate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.source.size_hint().1)
    }
}

impl<S, P> Stream for Filter<S, P>
where
    S: Stream,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let mut this = self.project();
        loop {
            match ready!(this.source.as_mut().poll_next(context)) {
                Some(element) if (this.predicate)(&element) => return Poll::Ready(Some(element)),
                Some(_) => {}
                None => return Poll::Ready(None),
            }
        }
    }
}

// =============================================================================
// take
// =============================================================================

pin_project! {
    /// Lazy sequence of at most `count` elements. Created by [`take`].
    #[must_use = "lazy sequences do nothing unless consumed"]
    pub struct Take<S> {
        #[pin]
        source: S,
        remaining: usize,
    }
}

/// Yields at most `count` elements.
///
/// Once `count` elements have been produced the source is never pulled
/// again, which makes `take` the way to bound an open-ended sequence.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{range_from, take, to_array};
///
/// assert_eq!(to_array(take(range_from(10), 3)), vec![10, 11, 12]);
/// ```
pub fn take<M, S>(input: S, count: usize) -> Take<S::Source>
where
    S: IntoLazy<M>,
{
    Take {
        source: input.into_lazy(),
        remaining: count,
    }
}

impl<S: Iterator> Iterator for Take<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let element = self.source.next();
        if element.is_none() {
            self.remaining = 0;
        }
        element
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.remaining == 0 {
            return (0, Some(0));
        }
        let (lower, upper) = self.source.size_hint();
        (
            lower.min(self.remaining),
            Some(upper.map_or(self.remaining, |upper| upper.min(self.remaining))),
        )
    }
}

impl<S: Stream> Stream for Take<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.project();
        if *this.remaining == 0 {
            return Poll::Ready(None);
        }
        let element = ready!(this.source.poll_next(context));
        *this.remaining = if element.is_some() {
            *this.remaining - 1
        } else {
            0
        };
        Poll::Ready(element)
    }
}

// =============================================================================
// skip
// =============================================================================

pin_project! {
    /// Lazy sequence skipping the first `count` elements. Created by [`skip`].
    #[must_use = "lazy sequences do nothing unless consumed"]
    pub struct Skip<S> {
        #[pin]
        source: S,
        remaining: usize,
    }
}

/// Skips the first `count` elements.
///
/// The skipped elements are pulled (and discarded) only when the first
/// element after them is requested.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{range, skip, to_array};
///
/// assert_eq!(to_array(skip(range(0, 5), 3)), vec![3, 4]);
/// ```
pub fn skip<M, S>(input: S, count: usize) -> Skip<S::Source>
where
    S: IntoLazy<M>,
{
    Skip {
        source: input.into_lazy(),
        remaining: count,
    }
}

impl<S: Iterator> Iterator for Skip<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        while self.remaining > 0 {
            self.remaining -= 1;
            self.source.next()?;
        }
        self.source.next()
    }
}

impl<S: Stream> Stream for Skip<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let mut this = self.project();
        while *this.remaining > 0 {
            if ready!(this.source.as_mut().poll_next(context)).is_none() {
                *this.remaining = 0;
                return Poll::Ready(None);
            }
            *this.remaining -= 1;
        }
        this.source.poll_next(context)
    }
}

// =============================================================================
// take_while
// =============================================================================

pin_project! {
    /// Lazy sequence of the leading elements satisfying a predicate.
    /// Created by [`take_while`].
    #[must_use = "lazy sequences do nothing unless consumed"]
    pub struct TakeWhile<S, P> {
        #[pin]
        source: S,
        predicate: P,
        finished: bool,
    }
}

/// Yields elements while `predicate` holds and stops at the first failure.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{range_from, take_while, to_array};
///
/// assert_eq!(to_array(take_while(range_from(0), |n: &i64| *n < 3)), vec![0, 1, 2]);
/// ```
pub fn take_while<M, S, P>(input: S, predicate: P) -> TakeWhile<S::Source, P>
where
    S: IntoLazy<M>,
    P: FnMut(&S::Item) -> bool,
{
    TakeWhile {
        source: input.into_lazy(),
        predicate,
        finished: false,
    }
}

impl<S, P> Iterator for TakeWhile<S, P>
where
    S: Iterator,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if self.finished {
            return None;
        }
        match self.source.next() {
            Some(element) if (self.predicate)(&element) => Some(element),
            _ => {
                self.finished = true;
                None
            }
        }
    }
}

impl<S, P> Stream for TakeWhile<S, P>
where
    S: Stream,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.project();
        if *this.finished {
            return Poll::Ready(None);
        }
        match ready!(this.source.poll_next(context)) {
            Some(element) if (this.predicate)(&element) => Poll::Ready(Some(element)),
            _ => {
                *this.finished = true;
                Poll::Ready(None)
            }
        }
    }
}

// =============================================================================
// skip_while
// =============================================================================

pin_project! {
    /// Lazy sequence skipping the leading elements satisfying a predicate.
    /// Created by [`skip_while`].
    #[must_use = "lazy sequences do nothing unless consumed"]
    pub struct SkipWhile<S, P> {
        #[pin]
        source: S,
        predicate: P,
        dropping: bool,
    }
}

/// Skips elements while `predicate` holds, then yields everything after.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{skip_while, to_array};
///
/// let rest = skip_while(vec![1, 2, 5, 1], |n: &i32| *n < 3);
/// assert_eq!(to_array(rest), vec![5, 1]);
/// ```
pub fn skip_while<M, S, P>(input: S, predicate: P) -> SkipWhile<S::Source, P>
where
    S: IntoLazy<M>,
    P: FnMut(&S::Item) -> bool,
{
    SkipWhile {
        source: input.into_lazy(),
        predicate,
        dropping: true,
    }
}

impl<S, P> Iterator for SkipWhile<S, P>
where
    S: Iterator,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        loop {
            let element = self.source.next()?;
            if !self.dropping || !(self.predicate)(&element) {
                self.dropping = false;
                return Some(element);
            }
        }
    }
}

impl<S, P> Stream for SkipWhile<S, P>
where
    S: Stream,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let mut this = self.project();
        loop {
            let Some(element) = ready!(this.source.as_mut().poll_next(context)) else {
                return Poll::Ready(None);
            };
            if !*this.dropping || !(this.predicate)(&element) {
                *this.dropping = false;
                return Poll::Ready(Some(element));
            }
        }
    }
}
