//! Function composition utilities.
//!
//! # Overview
//!
//! - [`pipe!`]: apply functions to a value, left to right
//! - [`pipe_fn!`]: build a reusable left-to-right pipeline
//! - [`compose!`]: build a right-to-left composition
//! - [`pipe_all`] / [`compose_all`]: fold a runtime list of `T -> T` steps
//! - [`curry!`](crate::curry!): curry a closure or a function of known arity
//! - [`curry2!`] through [`curry6!`]: declarative currying by arity
//! - [`flip`] through [`flip5`], [`flip_args`]: reverse positional arguments
//! - [`uncurry2`] through [`uncurry4`]: apply a curried function to a full
//!   argument list
//! - [`memoize`] through [`memoize4`]: cache results by argument
//!
//! Macros are exported at the crate root and re-exported here.
//!
//! # Examples
//!
//! ```
//! use fp_pack::{compose, pipe, pipe_fn};
//!
//! fn add_one(x: i32) -> i32 { x + 1 }
//! fn double(x: i32) -> i32 { x * 2 }
//!
//! assert_eq!(pipe!(5, double, add_one), 11);
//! assert_eq!(pipe_fn!(double, add_one)(5), 11);
//! assert_eq!(compose!(add_one, double)(5), 11);
//! ```
//!
//! Currying, with grouping equivalence:
//!
//! ```
//! use fp_pack::compose::uncurry3;
//! use fp_pack::curry;
//!
//! fn volume(width: u32, height: u32, depth: u32) -> u32 { width * height * depth }
//!
//! let curried = curry!(volume, 3);
//! assert_eq!(curried(2)(3)(4), volume(2, 3, 4));
//! assert_eq!(uncurry3(curry!(volume, 3))(2, 3, 4), volume(2, 3, 4));
//! ```
//!
//! # Laws
//!
//! - **Associativity**: `compose!(f, compose!(g, h)) == compose!(compose!(f, g), h)`
//! - **Identity**: `compose!(identity, f) == f == compose!(f, identity)`
//! - **Pipe/compose duality**: `pipe!(x, f, g) == compose!(g, f)(x)`
//! - **Double flip**: `flip(flip(f)) == f`

mod compose_macro;
mod curry_macro;
mod memoize;
mod pipe_macro;
mod utils;
mod variadic;

pub use memoize::{ArgumentKey, MemoKey, memoize, memoize2, memoize3, memoize4};
pub use utils::{
    constant, flip, flip_args, flip3, flip4, flip5, identity, uncurry2, uncurry3, uncurry4,
};
pub use variadic::{compose_all, pipe_all};

pub use crate::compose;
pub use crate::curry2;
pub use crate::curry3;
pub use crate::curry4;
pub use crate::curry5;
pub use crate::curry6;
pub use crate::pipe;
pub use crate::pipe_fn;
pub use fp_pack_derive::curry;
