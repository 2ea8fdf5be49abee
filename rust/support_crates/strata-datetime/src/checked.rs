//! Overflow-reporting integer arithmetic and floor rounding.

use num_traits::{CheckedAdd, CheckedMul, CheckedSub};

/// Adds two values, returning `None` on overflow.
#[inline]
pub fn try_add<T: CheckedAdd>(left: T, right: T) -> Option<T> {
    left.checked_add(&right)
}

/// Subtracts `right` from `left`, returning `None` on overflow.
#[inline]
pub fn try_subtract<T: CheckedSub>(left: T, right: T) -> Option<T> {
    left.checked_sub(&right)
}

/// Multiplies two values, returning `None` on overflow.
#[inline]
pub fn try_multiply<T: CheckedMul>(left: T, right: T) -> Option<T> {
    left.checked_mul(&right)
}

/// Divides `value` by `scale`, rounding towards negative infinity.
///
/// ```
/// # use strata_datetime::checked::temporal_round;
/// assert_eq!(temporal_round(-1, 1000), -1);
/// assert_eq!(temporal_round(999, 1000), 0);
/// ```
#[inline]
pub const fn temporal_round(value: i64, scale: i64) -> i64 {
    let negative = (value < 0) as i64;
    (value + negative) / scale - negative
}
