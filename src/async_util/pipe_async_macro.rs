//! The `pipe_async!` macro for pipelines with awaited steps.

/// Pipes a value through plain and asynchronous steps, left to right.
///
/// # Operators
///
/// - `f` or `=> f`: apply a plain function to the current value
/// - `=>> f`: apply a function returning a future and await it
///
/// The macro evaluates to a future; nothing runs until it is awaited.
/// Each step starts only after the previous one has finished, so an
/// awaited step fully settles before the next step sees its output.
///
/// # Examples
///
/// ```
/// use fp_pack::pipe_async;
///
/// async fn fetch_double(x: i32) -> i32 { x * 2 }
///
/// # futures::executor::block_on(async {
/// let result = pipe_async!(
///     10,
///     |x: i32| x / 2,
///     =>> fetch_double,
///     => |x: i32| x + 1,
/// )
/// .await;
/// assert_eq!(result, 11);
/// # });
/// ```
///
/// Errors flow through as values; use `?` inside async steps that return
/// `Result`:
///
/// ```
/// use fp_pack::pipe_async;
///
/// async fn parse(text: String) -> Result<i32, std::num::ParseIntError> {
///     text.trim().parse()
/// }
///
/// # futures::executor::block_on(async {
/// let parsed = pipe_async!(String::from(" 42 "), =>> parse).await;
/// assert_eq!(parsed, Ok(42));
/// # });
/// ```
#[macro_export]
macro_rules! pipe_async {
    (@chain $value:expr;) => {
        $value
    };

    (@chain $value:expr; =>> $function:expr $(, $($rest:tt)*)?) => {
        $crate::pipe_async!(@chain ($function)($value).await; $($($rest)*)?)
    };

    (@chain $value:expr; => $function:expr $(, $($rest:tt)*)?) => {
        $crate::pipe_async!(@chain ($function)($value); $($($rest)*)?)
    };

    (@chain $value:expr; $function:expr $(, $($rest:tt)*)?) => {
        $crate::pipe_async!(@chain ($function)($value); $($($rest)*)?)
    };

    ($value:expr $(, $($steps:tt)*)?) => {
        async move { $crate::pipe_async!(@chain $value; $($($steps)*)?) }
    };
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_pipe_async_value_only() {
        assert_eq!(pipe_async!(42).await, 42);
    }

    #[tokio::test]
    async fn test_pipe_async_is_lazy_until_awaited() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&log);
        let pending = pipe_async!(1, move |x: i32| {
            recorder.lock().unwrap().push(x);
            x
        });
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(pending.await, 1);
        assert_eq!(*log.lock().unwrap(), vec![1]);
    }
}
