//! The `pipe!` and `pipe_fn!` macros for left-to-right function application.

/// Pipes a value through a series of functions from left to right.
///
/// `pipe!(x, f, g, h)` is equivalent to `h(g(f(x)))`. The functions run
/// immediately, in the order they are written, each receiving the previous
/// result. `pipe!(x)` returns `x`.
///
/// Each step is called exactly once, so [`FnOnce`] closures are accepted.
/// Closure parameters are inferred from the previous step's output.
///
/// # Examples
///
/// ```
/// use fp_pack::pipe;
///
/// fn double(x: i32) -> i32 { x * 2 }
/// fn add_one(x: i32) -> i32 { x + 1 }
///
/// assert_eq!(pipe!(5, double, add_one), 11);
/// assert_eq!(pipe!(5), 5);
/// ```
///
/// Steps may change the type of the value:
///
/// ```
/// use fp_pack::pipe;
///
/// let length = pipe!(12345, |n: i32| n.to_string(), |text| String::len(&text));
/// assert_eq!(length, 5);
/// ```
#[macro_export]
macro_rules! pipe {
    ($value:expr $(, $function:expr)* $(,)?) => {{
        let value = $value;
        $(let value = ($function)(value);)*
        value
    }};
}

/// Builds a reusable function that pipes its input through `functions`
/// from left to right.
///
/// `pipe_fn!(f, g, h)` returns `|x| h(g(f(x)))`. Nothing runs until the
/// result is called; it can be called any number of times when every step
/// is [`Fn`]. `pipe_fn!(f)` is `f` itself.
///
/// # Examples
///
/// ```
/// use fp_pack::pipe_fn;
///
/// let normalize = pipe_fn!(
///     |text: &str| text.trim().to_lowercase(),
///     |text: String| text.replace(' ', "-"),
/// );
/// assert_eq!(normalize("  Hello World "), "hello-world");
/// assert_eq!(normalize("Rust"), "rust");
/// ```
#[macro_export]
macro_rules! pipe_fn {
    ($function:expr $(,)?) => {
        $function
    };

    ($first:expr, $($rest:expr),+ $(,)?) => {{
        let first = $first;
        let rest = $crate::pipe_fn!($($rest),+);
        move |value| rest(first(value))
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_pipe_evaluates_steps_in_order() {
        let mut log = Vec::new();
        let result = pipe!(
            1,
            |n: i32| {
                log.push("first");
                n + 1
            },
            |n: i32| n * 10
        );
        log.push("done");
        assert_eq!(result, 20);
        assert_eq!(log, vec!["first", "done"]);
    }

    #[test]
    fn test_pipe_fn_is_reusable() {
        let increment_then_double = pipe_fn!(|n: i32| n + 1, |n: i32| n * 2);
        assert_eq!(increment_then_double(1), 4);
        assert_eq!(increment_then_double(4), 10);
    }

    #[test]
    fn test_pipe_fn_single_function() {
        let negate = pipe_fn!(|n: i32| -n);
        assert_eq!(negate(3), -3);
    }
}
