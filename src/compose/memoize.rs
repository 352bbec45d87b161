//! Argument-keyed result caching.
//!
//! [`memoize`] and its multi-argument siblings wrap a function so that
//! each distinct argument list is computed once. Results are kept in a
//! trie with one level per argument position, owned by the returned
//! wrapper; two wrappers around the same function never share entries.
//!
//! # Key semantics
//!
//! Arguments are turned into [`ArgumentKey`]s through [`MemoKey`]:
//!
//! - integers, `bool`, `char`, `()` and strings compare by value;
//! - floats compare by value, with every NaN equal to every other NaN and
//!   `-0.0` equal to `0.0`;
//! - [`Rc`] and [`Arc`] compare by pointer identity: two allocations with
//!   equal contents are different keys, and the cache keeps the
//!   allocation alive while the key is stored;
//! - `Option`, `Vec` and tuples compare element-wise.
//!
//! # Re-entrancy
//!
//! The cache is not borrowed while the wrapped function runs, so a
//! memoized function may call itself through the wrapper.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

use tracing::trace;

/// A cache key for one argument.
#[derive(Clone)]
pub enum ArgumentKey {
    /// A signed integer.
    Int(i128),
    /// An unsigned integer.
    UInt(u128),
    /// A boolean.
    Bool(bool),
    /// A character.
    Char(char),
    /// A string, owned by the key.
    Str(String),
    /// The normalized bit pattern of a float.
    Float(u64),
    /// The unit value.
    Unit,
    /// `None`.
    Absent,
    /// An ordered group of keys: `Some`, tuples and vectors.
    Sequence(Vec<Self>),
    /// A single-threaded shared allocation, compared by address.
    Shared(Rc<dyn Any>),
    /// A thread-safe shared allocation, compared by address.
    Atomic(Arc<dyn Any + Send + Sync>),
}

impl ArgumentKey {
    /// Builds a float key where all NaNs are equal and `-0.0 == 0.0`.
    #[must_use]
    pub fn float(value: f64) -> Self {
        let normalized = if value.is_nan() {
            f64::NAN
        } else if value == 0.0 {
            0.0
        } else {
            value
        };
        Self::Float(normalized.to_bits())
    }

    fn address(&self) -> Option<usize> {
        match self {
            Self::Shared(shared) => Some(Rc::as_ptr(shared).cast::<()>().addr()),
            Self::Atomic(atomic) => Some(Arc::as_ptr(atomic).cast::<()>().addr()),
            _ => None,
        }
    }
}

impl PartialEq for ArgumentKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::UInt(left), Self::UInt(right)) => left == right,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Char(left), Self::Char(right)) => left == right,
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::Unit, Self::Unit) | (Self::Absent, Self::Absent) => true,
            (Self::Sequence(left), Self::Sequence(right)) => left == right,
            (Self::Shared(_), Self::Shared(_)) | (Self::Atomic(_), Self::Atomic(_)) => {
                self.address() == other.address()
            }
            _ => false,
        }
    }
}

impl Eq for ArgumentKey {}

impl Hash for ArgumentKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Int(value) => value.hash(state),
            Self::UInt(value) => value.hash(state),
            Self::Bool(value) => value.hash(state),
            Self::Char(value) => value.hash(state),
            Self::Str(value) => value.hash(state),
            Self::Float(bits) => bits.hash(state),
            Self::Sequence(keys) => keys.hash(state),
            Self::Shared(_) | Self::Atomic(_) => self.address().hash(state),
            Self::Unit | Self::Absent => {}
        }
    }
}

impl fmt::Debug for ArgumentKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => formatter.debug_tuple("Int").field(value).finish(),
            Self::UInt(value) => formatter.debug_tuple("UInt").field(value).finish(),
            Self::Bool(value) => formatter.debug_tuple("Bool").field(value).finish(),
            Self::Char(value) => formatter.debug_tuple("Char").field(value).finish(),
            Self::Str(value) => formatter.debug_tuple("Str").field(value).finish(),
            Self::Float(bits) => formatter
                .debug_tuple("Float")
                .field(&f64::from_bits(*bits))
                .finish(),
            Self::Unit => formatter.write_str("Unit"),
            Self::Absent => formatter.write_str("Absent"),
            Self::Sequence(keys) => formatter.debug_tuple("Sequence").field(keys).finish(),
            Self::Shared(_) | Self::Atomic(_) => {
                let name = if matches!(self, Self::Shared(_)) {
                    "Shared"
                } else {
                    "Atomic"
                };
                formatter
                    .debug_tuple(name)
                    .field(&format_args!("{:#x}", self.address().unwrap_or_default()))
                    .finish()
            }
        }
    }
}

/// Conversion of a function argument into its cache key.
///
/// Implement this for your own argument types to memoize functions that
/// take them; usually by delegating to a field or a tuple of fields.
///
/// ```
/// use fp_pack::compose::{ArgumentKey, MemoKey, memoize};
///
/// #[derive(Clone, Copy)]
/// struct Point { x: i32, y: i32 }
///
/// impl MemoKey for Point {
///     fn memo_key(&self) -> ArgumentKey {
///         (self.x, self.y).memo_key()
///     }
/// }
///
/// let norm = memoize(|point: Point| point.x.abs() + point.y.abs());
/// assert_eq!(norm(Point { x: 3, y: -4 }), 7);
/// ```
pub trait MemoKey {
    /// Returns the key identifying this argument.
    fn memo_key(&self) -> ArgumentKey;
}

macro_rules! impl_memo_key_signed {
    ($($integer:ty),*) => {
        $(impl MemoKey for $integer {
            fn memo_key(&self) -> ArgumentKey {
                ArgumentKey::Int(i128::from(*self))
            }
        })*
    };
}

macro_rules! impl_memo_key_unsigned {
    ($($integer:ty),*) => {
        $(impl MemoKey for $integer {
            fn memo_key(&self) -> ArgumentKey {
                ArgumentKey::UInt(u128::from(*self))
            }
        })*
    };
}

impl_memo_key_signed!(i8, i16, i32, i64, i128);
impl_memo_key_unsigned!(u8, u16, u32, u64, u128);

impl MemoKey for isize {
    fn memo_key(&self) -> ArgumentKey {
        ArgumentKey::Int(*self as i128)
    }
}

impl MemoKey for usize {
    fn memo_key(&self) -> ArgumentKey {
        ArgumentKey::UInt(*self as u128)
    }
}

impl MemoKey for f64 {
    fn memo_key(&self) -> ArgumentKey {
        ArgumentKey::float(*self)
    }
}

impl MemoKey for f32 {
    fn memo_key(&self) -> ArgumentKey {
        ArgumentKey::float(f64::from(*self))
    }
}

impl MemoKey for bool {
    fn memo_key(&self) -> ArgumentKey {
        ArgumentKey::Bool(*self)
    }
}

impl MemoKey for char {
    fn memo_key(&self) -> ArgumentKey {
        ArgumentKey::Char(*self)
    }
}

impl MemoKey for () {
    fn memo_key(&self) -> ArgumentKey {
        ArgumentKey::Unit
    }
}

impl MemoKey for str {
    fn memo_key(&self) -> ArgumentKey {
        ArgumentKey::Str(self.to_owned())
    }
}

impl MemoKey for String {
    fn memo_key(&self) -> ArgumentKey {
        ArgumentKey::Str(self.clone())
    }
}

impl<T: MemoKey + ?Sized> MemoKey for &T {
    fn memo_key(&self) -> ArgumentKey {
        (**self).memo_key()
    }
}

impl<T: 'static> MemoKey for Rc<T> {
    fn memo_key(&self) -> ArgumentKey {
        let shared: Rc<dyn Any> = Self::clone(self);
        ArgumentKey::Shared(shared)
    }
}

impl<T: Send + Sync + 'static> MemoKey for Arc<T> {
    fn memo_key(&self) -> ArgumentKey {
        let atomic: Arc<dyn Any + Send + Sync> = Self::clone(self);
        ArgumentKey::Atomic(atomic)
    }
}

impl<T: MemoKey> MemoKey for Option<T> {
    fn memo_key(&self) -> ArgumentKey {
        self.as_ref().map_or(ArgumentKey::Absent, |value| {
            ArgumentKey::Sequence(vec![value.memo_key()])
        })
    }
}

impl<T: MemoKey> MemoKey for Vec<T> {
    fn memo_key(&self) -> ArgumentKey {
        ArgumentKey::Sequence(self.iter().map(MemoKey::memo_key).collect())
    }
}

macro_rules! impl_memo_key_tuple {
    ($($name:ident),+) => {
        impl<$($name: MemoKey),+> MemoKey for ($($name,)+) {
            #[allow(non_snake_case)]
            fn memo_key(&self) -> ArgumentKey {
                let ($($name,)+) = self;
                ArgumentKey::Sequence(vec![$($name.memo_key()),+])
            }
        }
    };
}

impl_memo_key_tuple!(A, B);
impl_memo_key_tuple!(A, B, C);
impl_memo_key_tuple!(A, B, C, D);

// =============================================================================
// Cache trie
// =============================================================================

/// Results keyed by argument lists, one trie level per argument position.
struct CacheTrie<R> {
    value: Option<R>,
    children: HashMap<ArgumentKey, Self>,
}

impl<R> Default for CacheTrie<R> {
    fn default() -> Self {
        Self {
            value: None,
            children: HashMap::new(),
        }
    }
}

impl<R: Clone> CacheTrie<R> {
    fn get(&self, path: &[ArgumentKey]) -> Option<R> {
        let mut node = self;
        for key in path {
            node = node.children.get(key)?;
        }
        node.value.clone()
    }

    fn insert(&mut self, path: Vec<ArgumentKey>, value: R) {
        let mut node = self;
        for key in path {
            node = node.children.entry(key).or_default();
        }
        node.value = Some(value);
    }
}

fn cached_or_compute<R, C>(cache: &RefCell<CacheTrie<R>>, path: Vec<ArgumentKey>, compute: C) -> R
where
    R: Clone,
    C: FnOnce() -> R,
{
    let cached = cache.borrow().get(&path);
    if let Some(value) = cached {
        return value;
    }

    trace!(arity = path.len(), key = ?path, "memoize cache miss");
    let value = compute();
    cache.borrow_mut().insert(path, value.clone());
    value
}

// =============================================================================
// Wrappers
// =============================================================================

/// Caches the results of a unary function.
///
/// The first call with a given argument runs `function` and stores a clone
/// of the result; later calls with an equal key return a clone of the
/// stored result without running `function`. Panics raised by `function`
/// propagate and leave nothing cached.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use fp_pack::compose::memoize;
///
/// let calls = Cell::new(0);
/// let square = memoize(|n: u64| {
///     calls.set(calls.get() + 1);
///     n * n
/// });
///
/// assert_eq!(square(12), 144);
/// assert_eq!(square(12), 144);
/// assert_eq!(calls.get(), 1);
/// ```
pub fn memoize<A, R, F>(function: F) -> impl Fn(A) -> R
where
    A: MemoKey,
    R: Clone,
    F: Fn(A) -> R,
{
    let cache = RefCell::new(CacheTrie::default());
    move |argument| {
        let path = vec![argument.memo_key()];
        cached_or_compute(&cache, path, || function(argument))
    }
}

/// Caches the results of a binary function, keyed by both arguments.
pub fn memoize2<A, B, R, F>(function: F) -> impl Fn(A, B) -> R
where
    A: MemoKey,
    B: MemoKey,
    R: Clone,
    F: Fn(A, B) -> R,
{
    let cache = RefCell::new(CacheTrie::default());
    move |first, second| {
        let path = vec![first.memo_key(), second.memo_key()];
        cached_or_compute(&cache, path, || function(first, second))
    }
}

/// Caches the results of a ternary function, keyed by all three arguments.
pub fn memoize3<A, B, C, R, F>(function: F) -> impl Fn(A, B, C) -> R
where
    A: MemoKey,
    B: MemoKey,
    C: MemoKey,
    R: Clone,
    F: Fn(A, B, C) -> R,
{
    let cache = RefCell::new(CacheTrie::default());
    move |first, second, third| {
        let path = vec![first.memo_key(), second.memo_key(), third.memo_key()];
        cached_or_compute(&cache, path, || function(first, second, third))
    }
}

/// Caches the results of a 4-ary function, keyed by all four arguments.
pub fn memoize4<A, B, C, D, R, F>(function: F) -> impl Fn(A, B, C, D) -> R
where
    A: MemoKey,
    B: MemoKey,
    C: MemoKey,
    D: MemoKey,
    R: Clone,
    F: Fn(A, B, C, D) -> R,
{
    let cache = RefCell::new(CacheTrie::default());
    move |first, second, third, fourth| {
        let path = vec![
            first.memo_key(),
            second.memo_key(),
            third.memo_key(),
            fourth.memo_key(),
        ];
        cached_or_compute(&cache, path, || function(first, second, third, fourth))
    }
}
