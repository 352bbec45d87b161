//! Runtime-length composition over homogeneous steps.
//!
//! [`pipe!`](crate::pipe!) and [`compose!`](crate::compose!) handle any
//! number of differently typed steps, but the steps must be written out.
//! When the list of steps is only known at run time every step has the
//! same `T -> T` shape and the list can be folded instead.

/// Builds a function applying every step from first to last.
///
/// An empty list of steps gives the identity function.
///
/// # Examples
///
/// ```
/// use fp_pack::compose::pipe_all;
///
/// let steps: Vec<Box<dyn Fn(i32) -> i32>> = vec![
///     Box::new(|x: i32| x + 1),
///     Box::new(|x: i32| x * 10),
/// ];
/// let run = pipe_all(steps);
/// assert_eq!(run(2), 30);
///
/// let nothing = pipe_all(Vec::<fn(i32) -> i32>::new());
/// assert_eq!(nothing(7), 7);
/// ```
pub fn pipe_all<T, I>(functions: I) -> impl Fn(T) -> T
where
    I: IntoIterator,
    I::Item: Fn(T) -> T,
{
    let steps: Vec<I::Item> = functions.into_iter().collect();
    move |value| steps.iter().fold(value, |current, step| step(current))
}

/// Builds a function applying every step from last to first.
///
/// # Examples
///
/// ```
/// use fp_pack::compose::compose_all;
///
/// fn add_one(x: i32) -> i32 { x + 1 }
/// fn double(x: i32) -> i32 { x * 2 }
///
/// let run = compose_all([add_one as fn(i32) -> i32, double]);
/// assert_eq!(run(5), 11);
/// ```
pub fn compose_all<T, I>(functions: I) -> impl Fn(T) -> T
where
    I: IntoIterator,
    I::Item: Fn(T) -> T,
{
    let steps: Vec<I::Item> = functions.into_iter().collect();
    move |value| steps.iter().rev().fold(value, |current, step| step(current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_all_and_compose_all_are_mirrors() {
        let steps: [fn(i64) -> i64; 3] = [|x| x - 3, |x| x * 7, |x| x + 1];
        let forward = pipe_all(steps);
        let backward = compose_all(steps.into_iter().rev());
        for value in [-5, 0, 12] {
            assert_eq!(forward(value), backward(value));
        }
    }
}
