//! The `compose!` macro for right-to-left function composition.

/// Composes functions from right to left.
///
/// `compose!(f, g, h)(x)` is equivalent to `f(g(h(x)))`: the rightmost
/// function runs first. `compose!(f)` is `f` itself.
///
/// `compose!(f, g, h)` and `pipe_fn!(h, g, f)` build the same function;
/// the macro reverses its arguments and hands them to
/// [`pipe_fn!`](crate::pipe_fn!).
///
/// # Laws
///
/// - **Associativity**: `compose!(f, compose!(g, h)) == compose!(compose!(f, g), h)`
/// - **Identity**: `compose!(identity, f) == f == compose!(f, identity)`
///
/// # Examples
///
/// ```
/// use fp_pack::compose;
///
/// fn add_one(x: i32) -> i32 { x + 1 }
/// fn double(x: i32) -> i32 { x * 2 }
/// fn square(x: i32) -> i32 { x * x }
///
/// let composed = compose!(add_one, double, square);
/// assert_eq!(composed(3), 19);
/// ```
///
/// ```
/// use fp_pack::{compose, pipe};
///
/// fn f(x: i32) -> i32 { x + 1 }
/// fn g(x: i32) -> i32 { x * 2 }
/// fn h(x: i32) -> i32 { x - 3 }
///
/// assert_eq!(compose!(h, g, f)(10), pipe!(10, f, g, h));
/// ```
#[macro_export]
macro_rules! compose {
    (@reverse [] [$($reversed:expr),+]) => {
        $crate::pipe_fn!($($reversed),+)
    };

    (@reverse [$head:expr $(, $tail:expr)*] [$($reversed:expr),*]) => {
        $crate::compose!(@reverse [$($tail),*] [$head $(, $reversed)*])
    };

    ($($function:expr),+ $(,)?) => {
        $crate::compose!(@reverse [$($function),+] [])
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_compose_applies_rightmost_first() {
        let composed = compose!(|x: i32| x + 1, |x: i32| x * 2);
        assert_eq!(composed(5), 11);
    }

    #[test]
    fn test_compose_changes_types() {
        let describe = compose!(|length: usize| length > 3, |text: &str| text.len());
        assert!(describe("four"));
        assert!(!describe("one"));
    }
}
