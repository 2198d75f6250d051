//! Utility functions shared by the kernels, the engine and the tests.
//!
//! # Floating-Point Comparison
//!
//! Exact equality is rarely the right test for accumulated floating-point
//! results. [`approx_eq`] compares within an absolute tolerance and treats two
//! NaNs as equal, so warm-up prefixes compare cleanly.
//!
//! ```
//! use trendcast::utils::{approx_eq, EPSILON};
//!
//! let a = 1.0 / 3.0;
//! let b = 0.333333333333333;
//! assert!(approx_eq(a, b, EPSILON));
//! ```

use crate::traits::SeriesElement;

/// Standard epsilon for high-precision floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for results of long accumulations or least-squares solves.
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Approximate equality check for floating-point values.
///
/// Returns `true` if `a` and `b` are within `tolerance` of each other,
/// or if both are NaN.
///
/// ```
/// use trendcast::utils::{approx_eq, EPSILON};
///
/// assert!(approx_eq(1.0, 1.0 + 1e-11, EPSILON));
/// assert!(!approx_eq(1.0, 2.0, EPSILON));
/// assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
/// assert!(!approx_eq(f64::NAN, 1.0, EPSILON));
/// ```
#[inline]
#[must_use]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < tolerance
}

/// Count the number of NaN values at the beginning of a slice.
///
/// Useful for checking a kernel's warm-up length against its `*_lookback`.
///
/// ```
/// use trendcast::utils::count_nan_prefix;
///
/// let data = vec![f64::NAN, f64::NAN, 1.0, 2.0, f64::NAN];
/// assert_eq!(count_nan_prefix(&data), 2);
/// ```
#[inline]
#[must_use]
pub fn count_nan_prefix<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().take_while(|x| x.is_nan()).count()
}

/// Maps the kernels' NaN warm-up marker to `None`.
///
/// ```
/// use trendcast::utils::defined;
///
/// assert_eq!(defined(f64::NAN), None);
/// assert_eq!(defined(2.5), Some(2.5));
/// ```
#[inline]
#[must_use]
pub fn defined(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_basic() {
        assert!(approx_eq(1.0_f64, 1.0, EPSILON));
        assert!(approx_eq(1.0_f64, 1.0 + 1e-11, EPSILON));
        assert!(!approx_eq(1.0_f64, 2.0, EPSILON));
    }

    #[test]
    fn test_approx_eq_nan() {
        assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
        assert!(!approx_eq(f64::NAN, 1.0, EPSILON));
        assert!(!approx_eq(1.0, f64::NAN, EPSILON));
    }

    #[test]
    fn test_count_nan_prefix() {
        let no_prefix = vec![1.0_f64, f64::NAN, 2.0];
        assert_eq!(count_nan_prefix(&no_prefix), 0);

        let all_nan = vec![f64::NAN; 3];
        assert_eq!(count_nan_prefix(&all_nan), 3);
    }

    #[test]
    fn test_defined() {
        assert_eq!(defined(f64::NAN), None);
        assert_eq!(defined(0.0), Some(0.0));
        assert_eq!(defined(-3.5), Some(-3.5));
    }
}
