#![cfg(feature = "compose")]
//! Property-based tests for composition laws.
//!
//! - **Associativity**: `compose!(f, compose!(g, h)) == compose!(compose!(f, g), h)`
//! - **Identity**: `compose!(identity, f) == f == compose!(f, identity)`
//! - **Pipe/compose duality**: `pipe!(x, f, g, h) == compose!(h, g, f)(x)`
//! - **Curry grouping**: `curry!(f)(a)(b)(c) == f(a, b, c) == uncurry3(curry!(f))(a, b, c)`
//! - **Flip**: `flip3(f)(a, b, c) == f(c, b, a)`, `flip_args(f)(v) == f(reversed v)`

use fp_pack::compose::{
    compose_all, flip, flip_args, flip3, flip4, identity, pipe_all, uncurry2, uncurry3,
};
use fp_pack::{compose, curry, curry2, pipe, pipe_fn};
use proptest::collection::vec;
use proptest::prelude::*;

fn shift(first: i64, second: i64, third: i64) -> i64 {
    first.wrapping_mul(31).wrapping_sub(second).wrapping_add(third.wrapping_mul(7))
}

// =============================================================================
// Composition Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_compose_identity(x in any::<i32>()) {
        let function = |n: i32| n.wrapping_mul(3);

        prop_assert_eq!(compose!(identity, function)(x), function(x));
        prop_assert_eq!(compose!(function, identity)(x), function(x));
    }

    #[test]
    fn prop_compose_associativity(x in any::<i32>()) {
        let function1 = |n: i32| n.wrapping_add(1);
        let function2 = |n: i32| n.wrapping_mul(2);
        let function3 = |n: i32| n.wrapping_sub(3);

        let left_associative = compose!(function1, compose!(function2, function3));
        let right_associative = compose!(compose!(function1, function2), function3);

        prop_assert_eq!(left_associative(x), right_associative(x));
    }

    #[test]
    fn prop_pipe_is_reversed_compose(x in any::<i32>()) {
        let function1 = |n: i32| n.wrapping_add(7);
        let function2 = |n: i32| n.wrapping_mul(-5);
        let function3 = |n: i32| n ^ 0x55;

        let piped = pipe!(x, function1, function2, function3);
        prop_assert_eq!(piped, compose!(function3, function2, function1)(x));
        prop_assert_eq!(piped, pipe_fn!(function1, function2, function3)(x));
    }

    #[test]
    fn prop_runtime_folds_match_macros(x in any::<i32>()) {
        let steps: [fn(i32) -> i32; 3] = [
            |n| n.wrapping_add(7),
            |n| n.wrapping_mul(-5),
            |n| n ^ 0x55,
        ];

        prop_assert_eq!(pipe_all(steps)(x), pipe!(x, steps[0], steps[1], steps[2]));
        prop_assert_eq!(compose_all(steps)(x), compose!(steps[0], steps[1], steps[2])(x));
    }
}

// =============================================================================
// Curry Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_curry_grouping_equivalence(a in any::<i64>(), b in any::<i64>(), c in any::<i64>()) {
        let expected = shift(a, b, c);

        prop_assert_eq!(curry!(shift, 3)(a)(b)(c), expected);
        prop_assert_eq!(uncurry3(curry!(shift, 3))(a, b, c), expected);
    }

    #[test]
    fn prop_curry2_equivalence(a in any::<i32>(), b in any::<i32>()) {
        let subtract = |x: i32, y: i32| x.wrapping_sub(y);

        prop_assert_eq!(curry2!(subtract)(a)(b), subtract(a, b));
        prop_assert_eq!(uncurry2(curry2!(subtract))(a, b), subtract(a, b));
    }
}

// =============================================================================
// Flip Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_double_flip_is_identity(a in any::<i32>(), b in any::<i32>()) {
        let subtract = |x: i32, y: i32| x.wrapping_sub(y);

        prop_assert_eq!(flip(flip(subtract))(a, b), subtract(a, b));
        prop_assert_eq!(flip(subtract)(a, b), subtract(b, a));
    }

    #[test]
    fn prop_flip3_reverses(a in any::<i64>(), b in any::<i64>(), c in any::<i64>()) {
        prop_assert_eq!(flip3(shift)(a, b, c), shift(c, b, a));
    }

    #[test]
    fn prop_flip4_reverses(values in proptest::array::uniform4(any::<u8>())) {
        let collect = |a: u8, b: u8, c: u8, d: u8| [a, b, c, d];
        let [a, b, c, d] = values;

        prop_assert_eq!(flip4(collect)(a, b, c, d), [d, c, b, a]);
    }

    #[test]
    fn prop_flip_args_reverses_whole_list(values in vec(any::<i16>(), 0..12)) {
        let flipped = flip_args(|arguments: Vec<i16>| arguments);
        let mut expected = values.clone();
        expected.reverse();

        prop_assert_eq!(flipped(values), expected);
    }
}
