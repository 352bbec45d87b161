//! Adaptors that regroup or join sequences: `chunk`, `zip` and `concat`.

use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures::stream::Stream;
use pin_project_lite::pin_project;

use super::input::IntoLazy;
use crate::error::SequenceError;

// =============================================================================
// chunk
// =============================================================================

pin_project! {
    /// Lazy sequence of fixed-size groups. Created by [`chunk`].
    #[must_use = "lazy sequences do nothing unless consumed"]
    pub struct Chunk<S, T> {
        #[pin]
        source: S,
        size: usize,
        buffer: Vec<T>,
        finished: bool,
    }
}

/// Groups elements into `Vec`s of `size` elements.
///
/// The last group holds whatever is left and may be shorter.
///
/// # Errors
///
/// Returns [`SequenceError::ZeroChunkSize`] when `size` is zero.
///
/// # Examples
///
/// ```rust
/// use fp_pack::error::SequenceError;
/// use fp_pack::stream::{chunk, range, to_array};
///
/// let groups = chunk(range(0, 5), 2)?;
/// assert_eq!(to_array(groups), vec![vec![0, 1], vec![2, 3], vec![4]]);
/// assert_eq!(chunk(range(0, 5), 0).err(), Some(SequenceError::ZeroChunkSize));
/// # Ok::<(), SequenceError>(())
/// ```
pub fn chunk<M, S>(input: S, size: usize) -> Result<Chunk<S::Source, S::Item>, SequenceError>
where
    S: IntoLazy<M>,
{
    if size == 0 {
        return Err(SequenceError::ZeroChunkSize);
    }
    Ok(Chunk {
        source: input.into_lazy(),
        size,
        buffer: Vec::with_capacity(size),
        finished: false,
    })
}

fn take_buffer<T>(buffer: &mut Vec<T>, size: usize) -> Vec<T> {
    mem::replace(buffer, Vec::with_capacity(size))
}

impl<S> Iterator for Chunk<S, S::Item>
where
    S: Iterator,
{
    type Item = Vec<S::Item>;

    fn next(&mut self) -> Option<Vec<S::Item>> {
        if self.finished {
            return None;
        }
        loop {
            match self.source.next() {
                Some(element) => {
                    self.buffer.push(element);
                    if self.buffer.len() == self.size {
                        return Some(take_buffer(&mut self.buffer, self.size));
                    }
                }
                None => {
                    self.finished = true;
                    return (!self.buffer.is_empty()).then(|| mem::take(&mut self.buffer));
                }
            }
        }
    }
}

impl<S> Stream for Chunk<S, S::Item>
where
    S: Stream,
{
    type Item = Vec<S::Item>;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if *this.finished {
            return Poll::Ready(None);
        }
        loop {
            match ready!(this.source.as_mut().poll_next(context)) {
                Some(element) => {
                    this.buffer.push(element);
                    if this.buffer.len() == *this.size {
                        return Poll::Ready(Some(take_buffer(this.buffer, *this.size)));
                    }
                }
                None => {
                    *this.finished = true;
                    let rest = (!this.buffer.is_empty()).then(|| mem::take(this.buffer));
                    return Poll::Ready(rest);
                }
            }
        }
    }
}

// =============================================================================
// zip
// =============================================================================

pin_project! {
    /// Lazy sequence of pairs. Created by [`zip`].
    #[must_use = "lazy sequences do nothing unless consumed"]
    pub struct Zip<A, B, T> {
        #[pin]
        first: A,
        #[pin]
        second: B,
        pending_first: Option<T>,
    }
}

/// Pairs up the elements of two sequences, stopping at the shorter one.
///
/// Both inputs must take the same code path: two synchronous iterables or
/// two asynchronous inputs. Use [`to_async`](super::to_async) to mix them.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{range, to_array, zip};
///
/// let pairs = zip(range(0, 3), vec!["a", "b"]);
/// assert_eq!(to_array(pairs), vec![(0, "a"), (1, "b")]);
/// ```
pub fn zip<MA, MB, A, B>(first: A, second: B) -> Zip<A::Source, B::Source, A::Item>
where
    A: IntoLazy<MA>,
    B: IntoLazy<MB>,
{
    Zip {
        first: first.into_lazy(),
        second: second.into_lazy(),
        pending_first: None,
    }
}

impl<A, B> Iterator for Zip<A, B, A::Item>
where
    A: Iterator,
    B: Iterator,
{
    type Item = (A::Item, B::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let left = self.first.next()?;
        let right = self.second.next()?;
        Some((left, right))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (first_lower, first_upper) = self.first.size_hint();
        let (second_lower, second_upper) = self.second.size_hint();
        let upper = match (first_upper, second_upper) {
            (Some(first), Some(second)) => Some(first.min(second)),
            (bound @ Some(_), None) | (None, bound) => bound,
        };
        (first_lower.min(second_lower), upper)
    }
}

impl<A, B> Stream for Zip<A, B, A::Item>
where
    A: Stream,
    B: Stream,
{
    type Item = (A::Item, B::Item);

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if this.pending_first.is_none() {
            match ready!(this.first.as_mut().poll_next(context)) {
                Some(left) => *this.pending_first = Some(left),
                None => return Poll::Ready(None),
            }
        }

        let right = ready!(this.second.as_mut().poll_next(context));
        Poll::Ready(right.and_then(|right| this.pending_first.take().map(|left| (left, right))))
    }
}

// =============================================================================
// concat
// =============================================================================

pin_project! {
    /// Lazy sequence of one sequence followed by another. Created by
    /// [`concat`].
    #[must_use = "lazy sequences do nothing unless consumed"]
    pub struct Concat<A, B> {
        #[pin]
        first: A,
        #[pin]
        second: B,
        first_done: bool,
    }
}

/// Yields every element of `first`, then every element of `second`.
///
/// `second` is not touched until `first` is exhausted.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{concat, range, to_array};
///
/// assert_eq!(to_array(concat(range(0, 2), vec![7, 8])), vec![0, 1, 7, 8]);
/// ```
pub fn concat<MA, MB, A, B>(first: A, second: B) -> Concat<A::Source, B::Source>
where
    A: IntoLazy<MA>,
    B: IntoLazy<MB, Item = A::Item>,
{
    Concat {
        first: first.into_lazy(),
        second: second.into_lazy(),
        first_done: false,
    }
}

impl<A, B> Iterator for Concat<A, B>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
{
    type Item = A::Item;

    fn next(&mut self) -> Option<A::Item> {
        if !self.first_done {
            if let Some(element) = self.first.next() {
                return Some(element);
            }
            self.first_done = true;
        }
        self.second.next()
    }
}

impl<A, B> Stream for Concat<A, B>
where
    A: Stream,
    B: Stream<Item = A::Item>,
{
    type Item = A::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<A::Item>> {
        let this = self.project();
        if !*this.first_done {
            if let Some(element) = ready!(this.first.poll_next(context)) {
                return Poll::Ready(Some(element));
            }
            *this.first_done = true;
        }
        this.second.poll_next(context)
    }
}
