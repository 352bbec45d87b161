//! Error types shared across fp-pack modules.
//!
//! Most primitives in this crate never fail on their own: errors raised by
//! user functions propagate unchanged. The types here cover the few inputs
//! the library itself rejects.

use thiserror::Error;

/// Rejected arguments to a lazy sequence constructor or adaptor.
///
/// # Examples
///
/// ```rust
/// use fp_pack::error::SequenceError;
/// use fp_pack::stream::range_by;
///
/// assert_eq!(range_by(0, 10, 0).unwrap_err(), SequenceError::ZeroStep);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A range was asked to advance by zero, which would never terminate.
    #[error("range step must not be zero")]
    ZeroStep,

    /// A range step points away from the range end.
    #[error("range step {step} never reaches {end} from {start}")]
    StepDirection {
        /// The inclusive start of the range.
        start: i64,
        /// The exclusive end of the range.
        end: i64,
        /// The rejected step.
        step: i64,
    },

    /// `chunk` was asked for chunks of size zero.
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_error_display() {
        assert_eq!(
            SequenceError::ZeroStep.to_string(),
            "range step must not be zero"
        );
        assert_eq!(
            SequenceError::StepDirection {
                start: 0,
                end: 10,
                step: -1
            }
            .to_string(),
            "range step -1 never reaches 10 from 0"
        );
        assert_eq!(
            SequenceError::ZeroChunkSize.to_string(),
            "chunk size must be greater than zero"
        );
    }
}
