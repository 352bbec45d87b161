//! Flattening adaptors: `flatten`, `flat_map` and `flatten_deep`.
//!
//! `flatten` and `flat_map` remove exactly one level of nesting.
//! `flatten_deep` removes every level of a [`Nest`] structure, walking it
//! with an explicit stack of pending child iterators instead of recursion,
//! so arbitrarily deep input cannot exhaust the call stack.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures::stream::Stream;
use pin_project_lite::pin_project;

use super::input::IntoLazy;

// =============================================================================
// Nested values
// =============================================================================

/// One step of a nested structure: a leaf value or a group of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<L, C> {
    /// A value that is yielded as-is.
    Leaf(L),
    /// Children that are flattened in order.
    Branch(C),
}

/// A value that [`flatten_deep`] can take apart.
///
/// Implement this for a tree-shaped type to deep-flatten it. Only the
/// implementation decides what counts as a branch; in particular strings
/// held as leaves are never split into characters.
pub trait Nest: Sized {
    /// The type of the values at the bottom of the structure.
    type Leaf;

    /// The children of a branch.
    type Children: IntoIterator<Item = Self>;

    /// Looks at the top level of the value.
    fn into_node(self) -> Node<Self::Leaf, Self::Children>;
}

/// An arbitrarily nested list of values.
///
/// Build one with the [`nested!`](crate::nested) macro and inspect it with
/// [`Nested::as_node`]:
///
/// ```rust
/// use fp_pack::nested;
/// use fp_pack::stream::{Nested, Node};
///
/// let value = nested![1, [2, 3]];
/// assert_eq!(
///     value,
///     Nested::branch(vec![
///         Nested::leaf(1),
///         Nested::branch(vec![Nested::leaf(2), Nested::leaf(3)]),
///     ])
/// );
/// assert!(matches!(value.as_node(), Node::Branch(children) if children.len() == 2));
/// ```
///
/// Iterating a `Nested` yields its top-level entries (a leaf yields
/// itself), so it can be passed straight to [`flatten_deep`].
///
/// Dropping, cloning, comparing and hashing walk the structure with an
/// explicit stack, so they work at any depth. `Debug` formatting recurses
/// once per level and is limited by the call stack.
pub struct Nested<T> {
    node: Node<T, Vec<Self>>,
}

impl<T> Nested<T> {
    /// Creates a leaf.
    pub const fn leaf(value: T) -> Self {
        Self {
            node: Node::Leaf(value),
        }
    }

    /// Creates a branch from any collection of nested values.
    pub fn branch<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self {
            node: Node::Branch(children.into_iter().collect()),
        }
    }

    /// Borrows the top level of the value.
    #[must_use]
    pub fn as_node(&self) -> Node<&T, &[Self]> {
        match &self.node {
            Node::Leaf(value) => Node::Leaf(value),
            Node::Branch(children) => Node::Branch(children.as_slice()),
        }
    }

    /// Returns `true` for a leaf.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf(_))
    }

    /// Returns the nesting depth; a leaf has depth zero.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];
        while let Some((value, depth)) = pending.pop() {
            if let Node::Branch(children) = &value.node {
                deepest = deepest.max(depth + 1);
                pending.extend(children.iter().map(|child| (child, depth + 1)));
            }
        }
        deepest
    }
}

impl<T> Drop for Nested<T> {
    fn drop(&mut self) {
        let Node::Branch(children) = &mut self.node else {
            return;
        };
        // Detach grandchildren before each child drops so no drop recurses.
        let mut pending = std::mem::take(children);
        while let Some(mut child) = pending.pop() {
            if let Node::Branch(grandchildren) = &mut child.node {
                pending.append(grandchildren);
            }
        }
    }
}

impl<T: Clone> Clone for Nested<T> {
    fn clone(&self) -> Self {
        let children = match &self.node {
            Node::Leaf(value) => return Self::leaf(value.clone()),
            Node::Branch(children) => children,
        };
        let mut frames = vec![(children.iter(), Vec::with_capacity(children.len()))];
        let mut finished = Vec::new();
        while let Some((source, built)) = frames.last_mut() {
            match source.next() {
                Some(child) => match &child.node {
                    Node::Leaf(value) => built.push(Self::leaf(value.clone())),
                    Node::Branch(grandchildren) => frames.push((
                        grandchildren.iter(),
                        Vec::with_capacity(grandchildren.len()),
                    )),
                },
                None => {
                    finished = std::mem::take(built);
                    frames.pop();
                    if let Some((_, parent)) = frames.last_mut() {
                        parent.push(Self::branch(std::mem::take(&mut finished)));
                    }
                }
            }
        }
        Self::branch(finished)
    }
}

impl<T: PartialEq> PartialEq for Nested<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            match (&left.node, &right.node) {
                (Node::Leaf(left), Node::Leaf(right)) => {
                    if left != right {
                        return false;
                    }
                }
                (Node::Branch(left), Node::Branch(right)) if left.len() == right.len() => {
                    pending.extend(left.iter().zip(right).rev());
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T: Eq> Eq for Nested<T> {}

impl<T: Hash> Hash for Nested<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut pending = vec![self];
        while let Some(value) = pending.pop() {
            match &value.node {
                Node::Leaf(leaf) => {
                    state.write_u8(0);
                    leaf.hash(state);
                }
                Node::Branch(children) => {
                    state.write_u8(1);
                    state.write_usize(children.len());
                    pending.extend(children.iter().rev());
                }
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Nested<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.node, formatter)
    }
}

impl<T> Nest for Nested<T> {
    type Leaf = T;
    type Children = Vec<Self>;

    fn into_node(mut self) -> Node<T, Vec<Self>> {
        std::mem::replace(&mut self.node, Node::Branch(Vec::new()))
    }
}

impl<T> IntoIterator for Nested<T> {
    type Item = Self;
    type IntoIter = std::vec::IntoIter<Self>;

    fn into_iter(self) -> Self::IntoIter {
        match self.into_node() {
            Node::Branch(children) => children.into_iter(),
            Node::Leaf(value) => vec![Self::leaf(value)].into_iter(),
        }
    }
}

/// Builds a [`Nested`] value from bracketed literals.
///
/// Every element is either a bracketed group, which becomes a branch, or a
/// single token tree, which becomes a leaf. Wrap compound leaf expressions
/// in parentheses.
///
/// # Examples
///
/// ```rust
/// use fp_pack::nested;
/// use fp_pack::stream::{flatten_deep, to_array};
///
/// let offset = 10;
/// let value = nested![1, [(-2), [offset, 4]], []];
/// assert_eq!(to_array(flatten_deep(value)), vec![1, -2, 10, 4]);
/// ```
#[macro_export]
macro_rules! nested {
    (@node [$($inner:tt),* $(,)?]) => {
        $crate::stream::Nested::branch(::std::vec![$($crate::nested!(@node $inner)),*])
    };

    (@node $leaf:expr) => {
        $crate::stream::Nested::leaf($leaf)
    };

    ($($element:tt),* $(,)?) => {
        $crate::stream::Nested::branch(::std::vec![$($crate::nested!(@node $element)),*])
    };
}

// =============================================================================
// flatten
// =============================================================================

pin_project! {
    /// Lazy sequence removing one level of nesting. Created by [`flatten`].
    #[must_use = "lazy sequences do nothing unless consumed"]
    pub struct Flatten<S, I> {
        #[pin]
        source: S,
        current: Option<I>,
    }
}

/// Flattens one level of nesting.
///
/// For asynchronous inputs each element is received from the stream and its
/// (synchronous) contents are yielded before the stream is polled again.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{flatten, to_array};
///
/// let rows = vec![vec![1, 2], vec![], vec![3]];
/// assert_eq!(to_array(flatten(rows)), vec![1, 2, 3]);
/// ```
pub fn flatten<M, S>(input: S) -> Flatten<S::Source, <S::Item as IntoIterator>::IntoIter>
where
    S: IntoLazy<M>,
    S::Item: IntoIterator,
{
    Flatten {
        source: input.into_lazy(),
        current: None,
    }
}

impl<S, I> Iterator for Flatten<S, I>
where
    S: Iterator,
    S::Item: IntoIterator<IntoIter = I>,
    I: Iterator,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            if let Some(inner) = self.current.as_mut() {
                if let Some(element) = inner.next() {
                    return Some(element);
                }
                self.current = None;
            }
            self.current = Some(self.source.next()?.into_iter());
        }
    }
}

impl<S, I> Stream for Flatten<S, I>
where
    S: Stream,
    S::Item: IntoIterator<IntoIter = I>,
    I: Iterator,
{
    type Item = I::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<I::Item>> {
        let mut this = self.project();
        loop {
            if let Some(inner) = this.current.as_mut() {
                if let Some(element) = inner.next() {
                    return Poll::Ready(Some(element));
                }
                *this.current = None;
            }
            match ready!(this.source.as_mut().poll_next(context)) {
                Some(group) => *this.current = Some(group.into_iter()),
                None => return Poll::Ready(None),
            }
        }
    }
}

// =============================================================================
// flat_map
// =============================================================================

pin_project! {
    /// Lazy sequence mapping each element to an iterable and flattening the
    /// results. Created by [`flat_map`].
    #[must_use = "lazy sequences do nothing unless consumed"]
    pub struct FlatMap<S, F, I> {
        #[pin]
        source: S,
        function: F,
        current: Option<I>,
    }
}

/// Maps each element to an iterable and yields the iterables' elements.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{flat_map, range, to_array};
///
/// let pairs = flat_map(range(1, 3), |n: i64| vec![n, n * 10]);
/// assert_eq!(to_array(pairs), vec![1, 10, 2, 20]);
/// ```
pub fn flat_map<M, S, F, U>(input: S, function: F) -> FlatMap<S::Source, F, U::IntoIter>
where
    S: IntoLazy<M>,
    F: FnMut(S::Item) -> U,
    U: IntoIterator,
{
    FlatMap {
        source: input.into_lazy(),
        function,
        current: None,
    }
}

impl<S, F, U, I> Iterator for FlatMap<S, F, I>
where
    S: Iterator,
    F: FnMut(S::Item) -> U,
    U: IntoIterator<IntoIter = I>,
    I: Iterator,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            if let Some(inner) = self.current.as_mut() {
                if let Some(element) = inner.next() {
                    return Some(element);
                }
                self.current = None;
            }
            let element = self.source.next()?;
            self.current = Some((self.function)(element).into_iter());
        }
    }
}

impl<S, F, U, I> Stream for FlatMap<S, F, I>
where
    S: Stream,
    F: FnMut(S::Item) -> U,
    U: IntoIterator<IntoIter = I>,
    I: Iterator,
{
    type Item = I::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<I::Item>> {
        let mut this = self.project();
        loop {
            if let Some(inner) = this.current.as_mut() {
                if let Some(element) = inner.next() {
                    return Poll::Ready(Some(element));
                }
                *this.current = None;
            }
            match ready!(this.source.as_mut().poll_next(context)) {
                Some(element) => *this.current = Some((this.function)(element).into_iter()),
                None => return Poll::Ready(None),
            }
        }
    }
}

// =============================================================================
// flatten_deep
// =============================================================================

pin_project! {
    /// Lazy sequence of the leaves of nested values. Created by
    /// [`flatten_deep`].
    #[must_use = "lazy sequences do nothing unless consumed"]
    pub struct FlattenDeep<S, C> {
        #[pin]
        source: S,
        stack: Vec<C>,
    }
}

/// Flattens every level of nesting, yielding leaves depth-first and
/// left-to-right.
///
/// Leaves are produced one at a time; no intermediate collection is built.
/// For asynchronous inputs each element is awaited through the stream and
/// its synchronous structure is then walked to the end before the stream
/// is polled again.
///
/// # Examples
///
/// ```rust
/// use fp_pack::nested;
/// use fp_pack::stream::{flatten_deep, to_array};
///
/// let value = nested![1, [2, [3, 4], 5], [[6]]];
/// assert_eq!(to_array(flatten_deep(value)), vec![1, 2, 3, 4, 5, 6]);
///
/// # futures::executor::block_on(async {
/// let pending = async { nested![1, [2, [3]], [[4]]] };
/// assert_eq!(to_array(flatten_deep(pending)).await, vec![1, 2, 3, 4]);
/// # });
/// ```
pub fn flatten_deep<M, S>(
    input: S,
) -> FlattenDeep<S::Source, <<S::Item as Nest>::Children as IntoIterator>::IntoIter>
where
    S: IntoLazy<M>,
    S::Item: Nest,
{
    FlattenDeep {
        source: input.into_lazy(),
        stack: Vec::new(),
    }
}

fn descend<N, C>(stack: &mut Vec<C>, node: N) -> Option<N::Leaf>
where
    N: Nest,
    N::Children: IntoIterator<IntoIter = C>,
{
    match node.into_node() {
        Node::Leaf(leaf) => Some(leaf),
        Node::Branch(children) => {
            stack.push(children.into_iter());
            None
        }
    }
}

fn drain_stack<N, C>(stack: &mut Vec<C>) -> Option<N::Leaf>
where
    N: Nest,
    N::Children: IntoIterator<IntoIter = C>,
    C: Iterator<Item = N>,
{
    while let Some(top) = stack.last_mut() {
        match top.next() {
            Some(node) => {
                if let Some(leaf) = descend(stack, node) {
                    return Some(leaf);
                }
            }
            None => {
                stack.pop();
            }
        }
    }
    None
}

impl<S, N, C> Iterator for FlattenDeep<S, C>
where
    S: Iterator<Item = N>,
    N: Nest,
    N::Children: IntoIterator<IntoIter = C>,
    C: Iterator<Item = N>,
{
    type Item = N::Leaf;

    fn next(&mut self) -> Option<N::Leaf> {
        loop {
            if let Some(leaf) = drain_stack::<N, C>(&mut self.stack) {
                return Some(leaf);
            }
            let node = self.source.next()?;
            if let Some(leaf) = descend(&mut self.stack, node) {
                return Some(leaf);
            }
        }
    }
}

impl<S, N, C> Stream for FlattenDeep<S, C>
where
    S: Stream<Item = N>,
    N: Nest,
    N::Children: IntoIterator<IntoIter = C>,
    C: Iterator<Item = N>,
{
    type Item = N::Leaf;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<N::Leaf>> {
        let mut this = self.project();
        loop {
            if let Some(leaf) = drain_stack::<N, C>(this.stack) {
                return Poll::Ready(Some(leaf));
            }
            let Some(node) = ready!(this.source.as_mut().poll_next(context)) else {
                return Poll::Ready(None);
            };
            if let Some(leaf) = descend(this.stack, node) {
                return Poll::Ready(Some(leaf));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn chain(leaf: i32, levels: usize) -> Nested<i32> {
        let mut value = Nested::leaf(leaf);
        for _ in 0..levels {
            value = Nested::branch(vec![value]);
        }
        value
    }

    fn hash_of(value: &Nested<i32>) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_nested_depth() {
        assert_eq!(Nested::leaf(1).depth(), 0);
        assert_eq!(crate::nested![1, [2, [3]]].depth(), 3);
    }

    #[test]
    fn test_flatten_deep_survives_deep_nesting() {
        let leaves: Vec<i32> = flatten_deep(chain(7, 100_000)).collect();
        assert_eq!(leaves, vec![7]);
    }

    #[test]
    fn test_deep_nested_drops_in_place() {
        let value = chain(7, 100_000);
        assert_eq!(value.depth(), 100_000);
        drop(value);
    }

    #[test]
    fn test_deep_nested_clone_compare_and_hash() {
        let value = chain(7, 100_000);
        let copy = value.clone();
        assert!(copy == value);
        assert_eq!(hash_of(&copy), hash_of(&value));

        let other = chain(8, 100_000);
        assert!(other != value);
        assert!(chain(7, 99_999) != value);
    }

    #[test]
    fn test_clone_keeps_shape() {
        let value = crate::nested![1, [2, [3, 4]], [], 5];
        let copy = value.clone();
        assert_eq!(copy, value);
        assert_eq!(format!("{copy:?}"), format!("{value:?}"));
        assert_eq!(flatten_deep(copy).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_equal_leaves_in_different_shapes_differ() {
        let flat = crate::nested![1, 2];
        let grouped = crate::nested![[1, 2]];
        assert_ne!(flat, grouped);
        assert_ne!(hash_of(&flat), hash_of(&grouped));
    }

    #[test]
    fn test_abandoned_flatten_deep_drops_pending_levels() {
        let mut value = Nested::leaf(0);
        for level in 1..=50_000 {
            value = Nested::branch(vec![Nested::leaf(level), value]);
        }
        let mut leaves = flatten_deep(value);
        assert_eq!(leaves.next(), Some(50_000));
        drop(leaves);
    }
}
