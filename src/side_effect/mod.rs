//! Deferred side effects that stop a pipeline.
//!
//! A [`SideEffect`] is an ordinary value holding work that has not run
//! yet. A pipeline step returns [`PipeResult::Effect`] to say "stop here";
//! [`pipe_side_effect!`](crate::pipe_side_effect!) then skips every
//! remaining step and hands the effect back to the caller, who decides
//! whether to run it.
//!
//! # Examples
//!
//! ```
//! use fp_pack::pipe_side_effect;
//! use fp_pack::side_effect::{PipeResult, SideEffect, run_pipe_result};
//!
//! fn validate(age: i32) -> PipeResult<i32, String> {
//!     if age < 0 {
//!         PipeResult::Effect(SideEffect::labeled("reject", move || format!("invalid age {age}")))
//!     } else {
//!         PipeResult::Value(age)
//!     }
//! }
//!
//! let accepted = pipe_side_effect!(20, |n: i32| n + 1, =>> validate, |n: i32| n.to_string());
//! assert_eq!(run_pipe_result(accepted), "21");
//!
//! let rejected = pipe_side_effect!(-5, |n: i32| n + 1, =>> validate, |n: i32| n.to_string());
//! assert!(rejected.is_side_effect());
//! assert_eq!(run_pipe_result(rejected), "invalid age -4");
//! ```

use std::fmt;

use tracing::trace;

/// Work that runs at most once, when [`SideEffect::effect`] is called.
#[must_use = "a side effect does nothing until `effect` is called"]
pub struct SideEffect<R> {
    thunk: Box<dyn FnOnce() -> R>,
    label: Option<String>,
}

impl<R> SideEffect<R> {
    /// Wraps `thunk` without running it.
    pub fn new<F>(thunk: F) -> Self
    where
        F: FnOnce() -> R + 'static,
    {
        Self {
            thunk: Box::new(thunk),
            label: None,
        }
    }

    /// Wraps `thunk` with a label for diagnostics.
    pub fn labeled<L, F>(label: L, thunk: F) -> Self
    where
        L: Into<String>,
        F: FnOnce() -> R + 'static,
    {
        Self {
            thunk: Box::new(thunk),
            label: Some(label.into()),
        }
    }

    /// Returns the label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Runs the deferred work and returns its result.
    ///
    /// Taking `self` guarantees the work runs at most once.
    pub fn effect(self) -> R {
        trace!(label = self.label.as_deref(), "running side effect");
        (self.thunk)()
    }
}

impl<R> fmt::Debug for SideEffect<R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SideEffect")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// The outcome of a pipeline step: a value to continue with, or a side
/// effect that stops the pipeline.
#[derive(Debug)]
pub enum PipeResult<T, R> {
    /// Continue with this value.
    Value(T),
    /// Stop; the caller decides whether to run the effect.
    Effect(SideEffect<R>),
}

impl<T, R> PipeResult<T, R> {
    /// Returns `true` for [`PipeResult::Effect`].
    #[must_use]
    pub const fn is_side_effect(&self) -> bool {
        matches!(self, Self::Effect(_))
    }

    /// Returns the value, discarding an effect without running it.
    #[must_use]
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Effect(_) => None,
        }
    }

    /// Transforms the value, leaving an effect untouched.
    pub fn map<U, F>(self, function: F) -> PipeResult<U, R>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Value(value) => PipeResult::Value(function(value)),
            Self::Effect(effect) => PipeResult::Effect(effect),
        }
    }

    /// Continues with a step that may itself stop, leaving an effect
    /// untouched.
    pub fn and_then<U, F>(self, function: F) -> PipeResult<U, R>
    where
        F: FnOnce(T) -> PipeResult<U, R>,
    {
        match self {
            Self::Value(value) => function(value),
            Self::Effect(effect) => PipeResult::Effect(effect),
        }
    }

    /// Collapses both cases into one type.
    ///
    /// ```
    /// use fp_pack::side_effect::{PipeResult, SideEffect};
    ///
    /// let stopped: PipeResult<u32, &str> = PipeResult::Effect(SideEffect::new(|| "stopped"));
    /// let message = stopped.fold(|n| format!("value {n}"), |effect| effect.effect().to_owned());
    /// assert_eq!(message, "stopped");
    /// ```
    pub fn fold<B, V, E>(self, on_value: V, on_effect: E) -> B
    where
        V: FnOnce(T) -> B,
        E: FnOnce(SideEffect<R>) -> B,
    {
        match self {
            Self::Value(value) => on_value(value),
            Self::Effect(effect) => on_effect(effect),
        }
    }
}

impl<T, R> From<SideEffect<R>> for PipeResult<T, R> {
    fn from(effect: SideEffect<R>) -> Self {
        Self::Effect(effect)
    }
}

/// Returns `true` when `result` carries a side effect.
#[must_use]
pub const fn is_side_effect<T, R>(result: &PipeResult<T, R>) -> bool {
    result.is_side_effect()
}

/// Returns the value, or runs the side effect and returns its result.
pub fn run_pipe_result<T>(result: PipeResult<T, T>) -> T {
    result.fold(|value| value, SideEffect::effect)
}

/// Pipes a value through steps that may stop early with a [`SideEffect`].
///
/// - `f` (comma) applies a plain function;
/// - `=>> g` applies a function returning [`PipeResult`]; an
///   `Effect` result ends the pipeline immediately and is returned
///   without being run.
///
/// The whole expression evaluates to a `PipeResult`.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use fp_pack::pipe_side_effect;
/// use fp_pack::side_effect::{PipeResult, SideEffect};
///
/// let later_steps = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&later_steps);
///
/// let result = pipe_side_effect!(
///     3,
///     =>> |_: i32| PipeResult::<i32, ()>::Effect(SideEffect::new(|| ())),
///     move |n: i32| {
///         counter.set(counter.get() + 1);
///         n
///     },
/// );
/// assert!(result.is_side_effect());
/// assert_eq!(later_steps.get(), 0);
/// ```
#[macro_export]
macro_rules! pipe_side_effect {
    (@chain $label:lifetime; $value:expr;) => {
        $crate::side_effect::PipeResult::Value($value)
    };

    (@chain $label:lifetime; $value:expr; =>> $function:expr $(, $($rest:tt)*)?) => {
        $crate::pipe_side_effect!(@chain $label;
            match ($function)($value) {
                $crate::side_effect::PipeResult::Value(next) => next,
                $crate::side_effect::PipeResult::Effect(effect) => {
                    break $label $crate::side_effect::PipeResult::Effect(effect)
                }
            };
            $($($rest)*)?)
    };

    (@chain $label:lifetime; $value:expr; $function:expr $(, $($rest:tt)*)?) => {
        $crate::pipe_side_effect!(@chain $label; ($function)($value); $($($rest)*)?)
    };

    ($value:expr $(, $($steps:tt)*)?) => {
        'pipeline: {
            $crate::pipe_side_effect!(@chain 'pipeline; $value; $($($steps)*)?)
        }
    };
}
