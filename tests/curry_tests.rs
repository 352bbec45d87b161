//! Unit tests for `curry!` and the `curry2!`..`curry6!` family.

#![cfg(feature = "compose")]

use std::cell::Cell;

use fp_pack::{curry, curry2, curry3, curry4, curry5, curry6};
use rstest::rstest;

fn add(first: i32, second: i32) -> i32 {
    first + second
}

fn describe(name: String, age: u32, city: &str) -> String {
    format!("{name} ({age}) from {city}")
}

// =============================================================================
// curry! (procedural)
// =============================================================================

#[rstest]
fn curry_closure_infers_arity() {
    let volume = curry!(|width: u32, height: u32, depth: u32| width * height * depth);
    assert_eq!(volume(2)(3)(4), 24);
}

#[rstest]
fn curry_function_with_explicit_arity() {
    let curried = curry!(add, 2);
    assert_eq!(curried(5)(3), 8);
}

#[rstest]
fn curry_zero_arity_calls_immediately() {
    let calls = Cell::new(0);
    let value = curry!(|| {
        calls.set(calls.get() + 1);
        "ready"
    });
    assert_eq!(value, "ready");
    assert_eq!(calls.get(), 1);
}

#[rstest]
fn curry_unary_is_unchanged() {
    let negate = curry!(|n: i32| -n);
    assert_eq!(negate(4), -4);
}

#[rstest]
fn curry_partial_applications_are_reusable() {
    let curried = curry!(describe, 3);
    let alice = curried(String::from("Alice"));
    let alice_at_30 = alice(30);

    assert_eq!(alice_at_30("Paris"), "Alice (30) from Paris");
    assert_eq!(alice_at_30("Oslo"), "Alice (30) from Oslo");
    assert_eq!(alice(31)("Rome"), "Alice (31) from Rome");
}

#[rstest]
fn curry_defers_call_until_last_argument() {
    let calls = Cell::new(0);
    let curried = curry!(|a: i32, b: i32| {
        calls.set(calls.get() + 1);
        a * b
    });
    let partial = curried(6);
    assert_eq!(calls.get(), 0);
    assert_eq!(partial(7), 42);
    assert_eq!(calls.get(), 1);
}

// =============================================================================
// curry2! .. curry6!
// =============================================================================

#[rstest]
#[case(5, 3, 8)]
#[case(-1, 1, 0)]
fn curry2_matches_uncurried(#[case] first: i32, #[case] second: i32, #[case] expected: i32) {
    assert_eq!(curry2!(add)(first)(second), expected);
}

#[rstest]
fn curry3_with_non_copy_arguments() {
    let curried = curry3!(describe);
    let bob = curried(String::from("Bob"));
    assert_eq!(bob(40)("Lima"), "Bob (40) from Lima");
    assert_eq!(bob(41)("Kyiv"), "Bob (41) from Kyiv");
}

#[rstest]
fn curry4_and_curry5_apply_in_order() {
    let four = curry4!(|a: &str, b: &str, c: &str, d: &str| format!("{a}{b}{c}{d}"));
    assert_eq!(four("w")("x")("y")("z"), "wxyz");

    let five = curry5!(|a: i32, b: i32, c: i32, d: i32, e: i32| a - b - c - d - e);
    assert_eq!(five(100)(1)(2)(3)(4), 90);
}

#[rstest]
fn curry6_partial_chain() {
    let sum = curry6!(|a: u8, b: u8, c: u8, d: u8, e: u8, f: u8| {
        u32::from(a) + u32::from(b) + u32::from(c) + u32::from(d) + u32::from(e) + u32::from(f)
    });
    let halfway = sum(1)(2)(3);
    assert_eq!(halfway(4)(5)(6), 21);
    assert_eq!(halfway(10)(20)(30), 66);
}
