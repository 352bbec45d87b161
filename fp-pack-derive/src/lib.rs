//! Procedural macros for fp-pack.
//!
//! This crate provides the arity-inferring [`curry!`] macro. It is
//! re-exported by `fp-pack` behind the `compose` feature, so most users
//! never depend on it directly.

use proc_macro::TokenStream;

mod curry;

/// Converts a closure or function into curried form.
///
/// # Forms
///
/// - `curry!(|a, b, c| body)`: the arity is the number of closure parameters.
/// - `curry!(function, arity)`: the arity is given as an integer literal.
///
/// A zero-arity function is invoked immediately and its result returned.
/// A unary function is returned unchanged. Higher arities expand into nested
/// unary closures:
///
/// ```rust,ignore
/// use fp_pack::curry;
///
/// fn volume(width: u32, height: u32, depth: u32) -> u32 {
///     width * height * depth
/// }
///
/// let curried = curry!(volume, 3);
/// let base = curried(2)(3);
/// assert_eq!(base(4), 24);
/// assert_eq!(base(5), 30);
///
/// let greet = curry!(|greeting: &str, name: &str| format!("{greeting}, {name}"));
/// assert_eq!(greet("Hello")("fp"), "Hello, fp");
///
/// assert_eq!(curry!(|| 7), 7);
/// ```
///
/// # Requirements
///
/// Every argument except the last must implement `Clone`, since a partial
/// application may be applied more than once.
#[proc_macro]
pub fn curry(input: TokenStream) -> TokenStream {
    curry::curry_impl(input)
}
