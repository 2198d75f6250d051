//! CCI (Commodity Channel Index) indicator.
//!
//! CCI measures how far the typical price sits from its moving average, in
//! units of the window's mean absolute deviation.
//!
//! # Formula
//!
//! ```text
//! TP  = (high + low + close) / 3
//! MAD = Σ |TP[j] - SMA(TP)| / period        over the trailing window
//! CCI = (TP - SMA(TP, period)) / (0.015 × MAD)
//! ```
//!
//! The 0.015 constant scales roughly 70–80% of values into [−100, +100].
//! When every typical price in the window is equal, MAD is zero and CCI is
//! **0**: the price sits exactly on its average.
//!
//! The mean absolute deviation has no running-sum form, so each window is
//! scanned once: O(n × period).
//!
//! # Example
//!
//! ```
//! use trendcast::indicators::cci::cci;
//!
//! let high = vec![25.0_f64, 26.0, 27.0, 28.0, 27.5, 27.0, 26.5, 26.0, 25.5, 25.0];
//! let low = vec![23.0_f64, 24.0, 25.0, 26.0, 25.5, 25.0, 24.5, 24.0, 23.5, 23.0];
//! let close = vec![24.0_f64, 25.0, 26.0, 27.0, 26.5, 26.0, 25.5, 25.0, 24.5, 24.0];
//!
//! let result = cci(&high, &low, &close, 5).unwrap();
//! assert!(result[3].is_nan());
//! assert!(result[4].is_finite());
//! ```

use crate::error::Result;
use crate::kernels::rolling_sum::{rolling_lookback, rolling_mean};
use crate::traits::{validate_period, validate_same_length, SeriesElement};

/// Scaling constant of the CCI denominator.
pub const CCI_CONSTANT: f64 = 0.015;

/// Returns the number of NaN values at the start of CCI output.
///
/// ```
/// use trendcast::indicators::cci::cci_lookback;
///
/// assert_eq!(cci_lookback(20), 19);
/// ```
#[inline]
#[must_use]
pub const fn cci_lookback(period: usize) -> usize {
    rolling_lookback(period)
}

/// Typical price `(high + low + close) / 3` of each bar.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::LengthMismatch` if the inputs differ in length
pub fn typical_price<T: SeriesElement>(high: &[T], low: &[T], close: &[T]) -> Result<Vec<T>> {
    validate_same_length(&[("high", high), ("low", low), ("close", close)])?;
    let three = T::from_usize(3)?;
    Ok(high
        .iter()
        .zip(low)
        .zip(close)
        .map(|((&h, &l), &c)| (h + l + c) / three)
        .collect())
}

/// Computes the Commodity Channel Index.
///
/// An input shorter than `period` yields an all-NaN vector.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::LengthMismatch` if the inputs differ in length
/// - `Error::InvalidPeriod` if the period is zero
#[must_use = "this returns a Result with the CCI values, which should be used"]
pub fn cci<T: SeriesElement>(high: &[T], low: &[T], close: &[T], period: usize) -> Result<Vec<T>> {
    let tp = typical_price(high, low, close)?;
    validate_period(period)?;

    let mean = rolling_mean(&tp, period)?;
    let period_t = T::from_usize(period)?;
    let constant = T::from_f64(CCI_CONSTANT)?;

    let mut output = vec![T::nan(); tp.len()];
    for i in cci_lookback(period)..tp.len() {
        let avg = mean[i];
        if avg.is_nan() {
            continue;
        }
        let window = &tp[i + 1 - period..=i];
        let mad = window
            .iter()
            .fold(T::zero(), |acc, &x| acc + (x - avg).abs())
            / period_t;
        output[i] = if mad == T::zero() {
            T::zero()
        } else {
            (tp[i] - avg) / (constant * mad)
        };
    }
    Ok(output)
}
