//! Rolling extrema using a monotonic deque for O(n) rolling max/min.
//!
//! The deque holds indices whose values are monotonically ordered (decreasing
//! for max, increasing for min), so the front is always the extremum of the
//! current window. Each index is pushed and popped at most once, giving
//! amortised O(1) work per element instead of O(k) for a naive rescan.
//!
//! ```
//! use trendcast::kernels::rolling_extrema::{rolling_max, rolling_min};
//!
//! let data = vec![3.0_f64, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
//!
//! let max = rolling_max(&data, 3).unwrap();
//! assert!((max[2] - 4.0).abs() < 1e-10); // max of [3, 1, 4]
//! assert!((max[5] - 9.0).abs() < 1e-10); // max of [1, 5, 9]
//!
//! let min = rolling_min(&data, 3).unwrap();
//! assert!((min[2] - 1.0).abs() < 1e-10); // min of [3, 1, 4]
//! ```

use std::collections::VecDeque;

use crate::error::Result;
use crate::traits::{validate_kernel_input, SeriesElement};

/// A monotonic deque tracking the extremum of a sliding window.
#[derive(Debug, Clone)]
pub struct MonotonicDeque {
    deque: VecDeque<usize>,
    period: usize,
}

impl MonotonicDeque {
    /// Creates an empty deque for windows of `period` elements.
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self {
            deque: VecDeque::with_capacity(period),
            period,
        }
    }

    /// Pushes `data[index]` keeping the front at the window maximum.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for `data`.
    #[inline]
    pub fn push_max<T: SeriesElement>(&mut self, index: usize, data: &[T]) {
        let value = data[index];
        if value.is_nan() {
            self.remove_expired(index);
            return;
        }
        while let Some(&back) = self.deque.back() {
            if data[back] <= value {
                self.deque.pop_back();
            } else {
                break;
            }
        }
        self.deque.push_back(index);
        self.remove_expired(index);
    }

    /// Pushes `data[index]` keeping the front at the window minimum.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for `data`.
    #[inline]
    pub fn push_min<T: SeriesElement>(&mut self, index: usize, data: &[T]) {
        let value = data[index];
        if value.is_nan() {
            self.remove_expired(index);
            return;
        }
        while let Some(&back) = self.deque.back() {
            if data[back] >= value {
                self.deque.pop_back();
            } else {
                break;
            }
        }
        self.deque.push_back(index);
        self.remove_expired(index);
    }

    #[inline]
    fn remove_expired(&mut self, current_index: usize) {
        if current_index + 1 < self.period {
            return;
        }
        let window_start = current_index + 1 - self.period;
        while let Some(&front) = self.deque.front() {
            if front < window_start {
                self.deque.pop_front();
            } else {
                break;
            }
        }
    }

    /// Index of the current extremum, if the window holds any value.
    #[inline]
    #[must_use]
    pub fn front_index(&self) -> Option<usize> {
        self.deque.front().copied()
    }

    /// Current extremum, or NaN when the window is empty.
    #[inline]
    pub fn extremum<T: SeriesElement>(&self, data: &[T]) -> T {
        self.front_index().map_or_else(T::nan, |idx| data[idx])
    }
}

/// Rolling maximum and minimum of two (possibly different) columns.
///
/// `max` tracks `upper` and `min` tracks `lower`, which is the shape the
/// range oscillators need (highest high, lowest low).
#[derive(Debug, Clone)]
pub struct RollingExtremaOutput<T> {
    /// Rolling maximum values.
    pub max: Vec<T>,
    /// Rolling minimum values.
    pub min: Vec<T>,
}

/// Returns the number of NaN values at the start of rolling extrema output.
#[inline]
#[must_use]
pub const fn rolling_extrema_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Computes the rolling maximum over `period` elements.
///
/// The first `period - 1` values are NaN; an input shorter than the period
/// yields an all-NaN output.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is zero
pub fn rolling_max<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_kernel_input(data, period)?;
    let mut deque = MonotonicDeque::new(period);
    let lookback = rolling_extrema_lookback(period);
    let mut output = vec![T::nan(); data.len()];
    for i in 0..data.len() {
        deque.push_max(i, data);
        if i >= lookback {
            output[i] = deque.extremum(data);
        }
    }
    Ok(output)
}

/// Computes the rolling minimum over `period` elements.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is zero
pub fn rolling_min<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_kernel_input(data, period)?;
    let mut deque = MonotonicDeque::new(period);
    let lookback = rolling_extrema_lookback(period);
    let mut output = vec![T::nan(); data.len()];
    for i in 0..data.len() {
        deque.push_min(i, data);
        if i >= lookback {
            output[i] = deque.extremum(data);
        }
    }
    Ok(output)
}

/// Computes the rolling maximum of `upper` and rolling minimum of `lower` in
/// one pass.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::LengthMismatch` if the inputs differ in length
/// - `Error::InvalidPeriod` if `period` is zero
pub fn rolling_extrema<T: SeriesElement>(
    upper: &[T],
    lower: &[T],
    period: usize,
) -> Result<RollingExtremaOutput<T>> {
    crate::traits::validate_same_length(&[("upper", upper), ("lower", lower)])?;
    validate_kernel_input(upper, period)?;

    let n = upper.len();
    let lookback = rolling_extrema_lookback(period);
    let mut max_deque = MonotonicDeque::new(period);
    let mut min_deque = MonotonicDeque::new(period);
    let mut output = RollingExtremaOutput {
        max: vec![T::nan(); n],
        min: vec![T::nan(); n],
    };

    for i in 0..n {
        max_deque.push_max(i, upper);
        min_deque.push_min(i, lower);
        if i >= lookback {
            output.max[i] = max_deque.extremum(upper);
            output.min[i] = min_deque.extremum(lower);
        }
    }

    Ok(output)
}
