//! Declarative currying macros for functions of 2 to 6 arguments.
//!
//! `curryN!(f)` turns an `N`-ary function into `N` nested unary closures.
//! The function and every argument except the last are held in
//! [`Rc`](std::rc::Rc)s, so each partial application is [`Fn`] and can be
//! applied again. Arguments are cloned out of their `Rc` only when shared,
//! which means every argument but the last must be [`Clone`].
//!
//! For closures whose parameter count is visible, or when the arity is only
//! known at the call site, prefer the procedural [`curry!`](crate::curry!).

/// Builds the nested closure chain behind the `curryN!` macros.
#[doc(hidden)]
#[macro_export]
macro_rules! __curry_chain {
    ($function:ident; [$($bound:ident)*]; $last:ident) => {
        move |$last| {
            $function($(::std::rc::Rc::unwrap_or_clone(::std::rc::Rc::clone(&$bound)),)* $last)
        }
    };

    ($function:ident; [$($bound:ident)*]; $next:ident $($rest:ident)+) => {
        move |$next| {
            let $function = ::std::rc::Rc::clone(&$function);
            $(let $bound = ::std::rc::Rc::clone(&$bound);)*
            let $next = ::std::rc::Rc::new($next);
            $crate::__curry_chain!($function; [$($bound)* $next]; $($rest)+)
        }
    };
}

/// Converts a 2-argument function into a curried form.
///
/// # Examples
///
/// ```
/// use fp_pack::curry2;
///
/// fn multiply(first: i32, second: i32) -> i32 { first * second }
///
/// let curried = curry2!(multiply);
/// let double = curried(2);
/// let triple = curried(3);
///
/// assert_eq!(double(5), 10);
/// assert_eq!(triple(5), 15);
/// ```
#[macro_export]
macro_rules! curry2 {
    ($function:expr $(,)?) => {{
        let function = ::std::rc::Rc::new($function);
        $crate::__curry_chain!(function; []; first second)
    }};
}

/// Converts a 3-argument function into a curried form.
///
/// # Examples
///
/// ```
/// use fp_pack::curry3;
///
/// fn volume(width: f64, height: f64, depth: f64) -> f64 {
///     width * height * depth
/// }
///
/// let with_width = curry3!(volume)(2.0);
/// let with_width_height = with_width(3.0);
///
/// assert!((with_width_height(4.0) - 24.0).abs() < f64::EPSILON);
/// assert!((with_width_height(1.0) - 6.0).abs() < f64::EPSILON);
/// ```
#[macro_export]
macro_rules! curry3 {
    ($function:expr $(,)?) => {{
        let function = ::std::rc::Rc::new($function);
        $crate::__curry_chain!(function; []; first second third)
    }};
}

/// Converts a 4-argument function into a curried form.
///
/// ```
/// use fp_pack::curry4;
///
/// let curried = curry4!(|a: i32, b: i32, c: i32, d: i32| a * 1000 + b * 100 + c * 10 + d);
/// assert_eq!(curried(1)(2)(3)(4), 1234);
/// ```
#[macro_export]
macro_rules! curry4 {
    ($function:expr $(,)?) => {{
        let function = ::std::rc::Rc::new($function);
        $crate::__curry_chain!(function; []; first second third fourth)
    }};
}

/// Converts a 5-argument function into a curried form.
#[macro_export]
macro_rules! curry5 {
    ($function:expr $(,)?) => {{
        let function = ::std::rc::Rc::new($function);
        $crate::__curry_chain!(function; []; first second third fourth fifth)
    }};
}

/// Converts a 6-argument function into a curried form.
#[macro_export]
macro_rules! curry6 {
    ($function:expr $(,)?) => {{
        let function = ::std::rc::Rc::new($function);
        $crate::__curry_chain!(function; []; first second third fourth fifth sixth)
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_curry2_shares_non_copy_argument() {
        let join = curry2!(|left: String, right: &str| left + right);
        let greet = join(String::from("hello, "));
        assert_eq!(greet("world"), "hello, world");
        assert_eq!(greet("there"), "hello, there");
    }

    #[test]
    fn test_curry6_applies_in_order() {
        let digits = curry6!(|a: u32, b: u32, c: u32, d: u32, e: u32, f: u32| {
            [a, b, c, d, e, f].iter().fold(0, |acc, digit| acc * 10 + digit)
        });
        assert_eq!(digits(1)(2)(3)(4)(5)(6), 123_456);
    }
}
