//! Small combinators: `identity`, `constant`, the `flip` family and the
//! `uncurry` family.
//!
//! Rust functions have no implicit receiver. A method is flipped by
//! capturing the receiver in a closure (or passing it explicitly) before
//! flipping; flipping only ever reorders the positional arguments.
//!
//! ```
//! use fp_pack::compose::flip3;
//!
//! struct Formatter { separator: &'static str }
//!
//! impl Formatter {
//!     fn join(&self, first: &str, second: &str, third: &str) -> String {
//!         [first, second, third].join(self.separator)
//!     }
//! }
//!
//! let formatter = Formatter { separator: "-" };
//! let reversed = flip3(|a, b, c| formatter.join(a, b, c));
//! assert_eq!(reversed("x", "y", "z"), "z-y-x");
//! ```

/// Returns the value unchanged.
///
/// The identity function is the unit of composition:
/// `compose!(identity, f)` and `compose!(f, identity)` both behave as `f`.
///
/// ```
/// use fp_pack::compose::identity;
///
/// assert_eq!(identity(42), 42);
/// ```
#[inline]
pub const fn identity<T>(value: T) -> T {
    value
}

/// Creates a function that ignores its input and returns a clone of `value`.
///
/// ```
/// use fp_pack::compose::constant;
///
/// let values: Vec<i32> = vec![1, 2, 3].into_iter().map(constant(0)).collect();
/// assert_eq!(values, vec![0, 0, 0]);
/// ```
#[inline]
pub fn constant<T: Clone, U>(value: T) -> impl Fn(U) -> T {
    move |_| value.clone()
}

/// Swaps the arguments of a binary function.
///
/// `flip(f)(a, b) == f(b, a)`, and flipping twice gives back `f`.
///
/// ```
/// use fp_pack::compose::flip;
///
/// fn subtract(minuend: i32, subtrahend: i32) -> i32 { minuend - subtrahend }
///
/// assert_eq!(flip(subtract)(10, 3), -7);
/// assert_eq!(flip(flip(subtract))(10, 3), 7);
/// ```
#[inline]
pub fn flip<A, B, R, F>(function: F) -> impl Fn(B, A) -> R
where
    F: Fn(A, B) -> R,
{
    move |second, first| function(first, second)
}

/// Reverses the arguments of a ternary function: `flip3(f)(a, b, c) == f(c, b, a)`.
#[inline]
pub fn flip3<A, B, C, R, F>(function: F) -> impl Fn(C, B, A) -> R
where
    F: Fn(A, B, C) -> R,
{
    move |third, second, first| function(first, second, third)
}

/// Reverses the arguments of a 4-ary function.
#[inline]
pub fn flip4<A, B, C, D, R, F>(function: F) -> impl Fn(D, C, B, A) -> R
where
    F: Fn(A, B, C, D) -> R,
{
    move |fourth, third, second, first| function(first, second, third, fourth)
}

/// Reverses the arguments of a 5-ary function.
#[inline]
pub fn flip5<A, B, C, D, E, R, F>(function: F) -> impl Fn(E, D, C, B, A) -> R
where
    F: Fn(A, B, C, D, E) -> R,
{
    move |fifth, fourth, third, second, first| function(first, second, third, fourth, fifth)
}

/// Reverses a runtime argument list before passing it on.
///
/// This is the variadic form of [`flip`] for functions that take their
/// arguments as one `Vec`. The whole list is reversed, whatever its length.
///
/// ```
/// use fp_pack::compose::flip_args;
///
/// let describe = flip_args(|parts: Vec<&str>| parts.join(" "));
/// assert_eq!(describe(vec!["c", "b", "a"]), "a b c");
/// assert_eq!(describe(vec![]), "");
/// ```
#[inline]
pub fn flip_args<T, R, F>(function: F) -> impl Fn(Vec<T>) -> R
where
    F: Fn(Vec<T>) -> R,
{
    move |mut arguments| {
        arguments.reverse();
        function(arguments)
    }
}

/// Applies a curried binary function to both arguments at once.
///
/// ```
/// use fp_pack::compose::uncurry2;
/// use fp_pack::curry2;
///
/// fn add(first: i32, second: i32) -> i32 { first + second }
///
/// assert_eq!(uncurry2(curry2!(add))(2, 3), add(2, 3));
/// ```
#[inline]
pub fn uncurry2<A, B, R, F, G>(function: F) -> impl Fn(A, B) -> R
where
    F: Fn(A) -> G,
    G: FnOnce(B) -> R,
{
    move |first, second| function(first)(second)
}

/// Applies a curried ternary function to all three arguments at once.
#[inline]
pub fn uncurry3<A, B, C, R, F, G, H>(function: F) -> impl Fn(A, B, C) -> R
where
    F: Fn(A) -> G,
    G: FnOnce(B) -> H,
    H: FnOnce(C) -> R,
{
    move |first, second, third| function(first)(second)(third)
}

/// Applies a curried 4-ary function to all four arguments at once.
#[inline]
pub fn uncurry4<A, B, C, D, R, F, G, H, I>(function: F) -> impl Fn(A, B, C, D) -> R
where
    F: Fn(A) -> G,
    G: FnOnce(B) -> H,
    H: FnOnce(C) -> I,
    I: FnOnce(D) -> R,
{
    move |first, second, third, fourth| function(first)(second)(third)(fourth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_with_asymmetric_types() {
        fn power(base: i32, exponent: u32) -> i32 {
            base.pow(exponent)
        }

        assert_eq!(flip(power)(3, 2), 8);
    }

    #[test]
    fn test_flip5_reverses_all() {
        let collect = |a: u8, b: u8, c: u8, d: u8, e: u8| vec![a, b, c, d, e];
        assert_eq!(flip5(collect)(1, 2, 3, 4, 5), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_uncurry4_groups_all_arguments() {
        let curried = |a: i32| move |b: i32| move |c: i32| move |d: i32| a - b - c - d;
        assert_eq!(uncurry4(curried)(10, 1, 2, 3), 4);
    }
}
