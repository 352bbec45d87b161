//! Lazy integer ranges.

use crate::error::SequenceError;

/// Lazy sequence of integers. Created by [`range`], [`range_from`] and
/// [`range_by`].
///
/// `Range` is a synchronous source; pass it through
/// [`to_async`](super::to_async) to feed it into asynchronous pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "lazy sequences do nothing unless consumed"]
pub struct Range {
    next: i64,
    end: Option<i64>,
    step: i64,
    exhausted: bool,
}

/// Counts from `start` (inclusive) to `end` (exclusive).
///
/// The direction is chosen by comparing the bounds: `range(0, 5)` counts
/// up and `range(5, 0)` counts down. Equal bounds produce an empty range.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{range, to_array};
///
/// assert_eq!(to_array(range(0, 5)), vec![0, 1, 2, 3, 4]);
/// assert_eq!(to_array(range(5, 0)), vec![5, 4, 3, 2, 1]);
/// assert!(to_array(range(3, 3)).is_empty());
/// ```
pub const fn range(start: i64, end: i64) -> Range {
    Range {
        next: start,
        end: Some(end),
        step: if start <= end { 1 } else { -1 },
        exhausted: false,
    }
}

/// Counts upwards from `start` without an end.
///
/// Bound it with [`take`](super::take) or [`take_while`](super::take_while).
/// The sequence stops at `i64::MAX` instead of overflowing.
///
/// # Examples
///
/// ```rust
/// use fp_pack::stream::{range_from, take, to_array};
///
/// assert_eq!(to_array(take(range_from(7), 2)), vec![7, 8]);
/// ```
pub const fn range_from(start: i64) -> Range {
    Range {
        next: start,
        end: None,
        step: 1,
        exhausted: false,
    }
}

/// Counts from `start` (inclusive) to `end` (exclusive) by `step`.
///
/// # Errors
///
/// Returns [`SequenceError::ZeroStep`] when `step` is zero and
/// [`SequenceError::StepDirection`] when `step` moves away from `end`.
///
/// # Examples
///
/// ```rust
/// use fp_pack::error::SequenceError;
/// use fp_pack::stream::{range_by, to_array};
///
/// assert_eq!(to_array(range_by(0, 10, 3)?), vec![0, 3, 6, 9]);
/// assert_eq!(to_array(range_by(10, 0, -4)?), vec![10, 6, 2]);
/// assert!(range_by(0, 10, -1).is_err());
/// # Ok::<(), SequenceError>(())
/// ```
pub const fn range_by(start: i64, end: i64, step: i64) -> Result<Range, SequenceError> {
    if step == 0 {
        return Err(SequenceError::ZeroStep);
    }
    if (start < end && step < 0) || (start > end && step > 0) {
        return Err(SequenceError::StepDirection { start, end, step });
    }
    Ok(Range {
        next: start,
        end: Some(end),
        step,
        exhausted: false,
    })
}

impl Range {
    const fn reached_end(&self) -> bool {
        match self.end {
            Some(end) if self.step > 0 => self.next >= end,
            Some(end) => self.next <= end,
            None => false,
        }
    }

    /// Number of elements left, or `None` when it does not fit in `usize`.
    fn remaining(&self) -> Option<usize> {
        if self.exhausted || self.reached_end() {
            return Some(0);
        }
        let count = match self.end {
            Some(end) => {
                let distance = (i128::from(end) - i128::from(self.next)).unsigned_abs();
                distance.div_ceil(u128::from(self.step.unsigned_abs()))
            }
            // Open-ended ranges stop after yielding `i64::MAX`.
            None => (i128::from(i64::MAX) - i128::from(self.next)).unsigned_abs() + 1,
        };
        usize::try_from(count).ok()
    }
}

impl Iterator for Range {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.exhausted || self.reached_end() {
            return None;
        }
        let current = self.next;
        match current.checked_add(self.step) {
            Some(next) => self.next = next,
            None => self.exhausted = true,
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining()
            .map_or((usize::MAX, None), |remaining| (remaining, Some(remaining)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_size_hint_matches_length() {
        let ascending = range(-3, 4);
        assert_eq!(ascending.size_hint(), (7, Some(7)));
        assert_eq!(ascending.count(), 7);

        let stepped = range_by(0, 10, 4).unwrap();
        assert_eq!(stepped.size_hint(), (3, Some(3)));
    }

    #[test]
    fn test_range_from_stops_at_max() {
        let tail: Vec<i64> = range_from(i64::MAX - 1).collect();
        assert_eq!(tail, vec![i64::MAX - 1, i64::MAX]);

        let doubled: Vec<i64> = range_from(i64::MAX - 2).map(|n| n / 2).collect();
        assert_eq!(doubled.len(), 3);
    }

    #[test]
    fn test_range_from_size_hint_counts_to_max() {
        let mut tail = range_from(i64::MAX - 2);
        assert_eq!(tail.size_hint(), (3, Some(3)));
        tail.next();
        tail.next();
        tail.next();
        assert_eq!(tail.size_hint(), (0, Some(0)));

        #[cfg(target_pointer_width = "64")]
        assert_eq!(range_from(0).size_hint(), (1 << 63, Some(1 << 63)));
        assert_eq!(range_from(i64::MIN).size_hint(), (usize::MAX, None));
    }

    #[test]
    fn test_range_by_equal_bounds_any_direction() {
        assert_eq!(range_by(2, 2, -1).unwrap().next(), None);
        assert_eq!(range_by(2, 2, 1).unwrap().next(), None);
    }
}
