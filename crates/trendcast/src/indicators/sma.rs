//! Simple Moving Average (SMA) indicator.
//!
//! The SMA is the arithmetic mean of the last `period` values. It is computed
//! with an O(n) running sum (see [`rolling_mean`](crate::kernels::rolling_sum::rolling_mean)):
//! each step adds the entering value and subtracts the leaving one.
//!
//! # Formula
//!
//! ```text
//! SMA[i] = (x[i-period+1] + ... + x[i]) / period      for i >= period - 1
//! SMA[i] = NaN                                         otherwise
//! ```
//!
//! # Example
//!
//! ```
//! use trendcast::indicators::sma::sma;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = sma(&data, 3).unwrap();
//!
//! assert!(result[0].is_nan());
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10); // (1+2+3)/3
//! assert!((result[4] - 4.0).abs() < 1e-10); // (3+4+5)/3
//! ```

use crate::error::Result;
use crate::kernels::rolling_sum::{rolling_lookback, rolling_mean};
use crate::traits::SeriesElement;

/// Returns the number of NaN values at the start of SMA output.
///
/// ```
/// use trendcast::indicators::sma::sma_lookback;
///
/// assert_eq!(sma_lookback(20), 19);
/// ```
#[inline]
#[must_use]
pub const fn sma_lookback(period: usize) -> usize {
    rolling_lookback(period)
}

/// Computes the Simple Moving Average of a data series.
///
/// Returns a vector of the same length as the input. The first `period - 1`
/// values are NaN; an input shorter than `period` yields an all-NaN vector.
///
/// # Errors
///
/// - `Error::EmptyInput` if the input is empty
/// - `Error::InvalidPeriod` if the period is zero
///
/// # Performance
///
/// O(n) time, O(n) space for the output.
#[must_use = "this returns a Result with the SMA values, which should be used"]
pub fn sma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    rolling_mean(data, period)
}
