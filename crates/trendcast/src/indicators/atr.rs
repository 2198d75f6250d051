//! Average True Range (ATR) indicator.
//!
//! True Range widens the bar's high-low span to cover a gap from the previous
//! close. ATR is the simple moving average of True Range.
//!
//! # Formula
//!
//! ```text
//! TR[0] = high[0] - low[0]
//! TR[i] = max(high[i] - low[i], |high[i] - close[i-1]|, |low[i] - close[i-1]|)
//! ATR   = SMA(TR, period)
//! ```
//!
//! The first bar has no previous close, so its True Range is just the
//! high-low span. ATR is therefore defined from index `period - 1`.
//!
//! # Example
//!
//! ```
//! use trendcast::indicators::atr::{atr, true_range};
//!
//! let high = vec![10.0_f64, 11.0, 12.0, 11.5];
//! let low = vec![9.0_f64, 10.0, 11.0, 10.5];
//! let close = vec![9.5_f64, 10.5, 11.5, 11.0];
//!
//! let tr = true_range(&high, &low, &close).unwrap();
//! assert!((tr[0] - 1.0).abs() < 1e-10);
//! assert!((tr[2] - 1.5).abs() < 1e-10); // high - previous close
//!
//! let result = atr(&high, &low, &close, 3).unwrap();
//! assert!(result[1].is_nan());
//! assert!(!result[2].is_nan());
//! ```

use crate::error::Result;
use crate::kernels::rolling_sum::{rolling_lookback, rolling_mean};
use crate::traits::{validate_period, validate_same_length, SeriesElement};

/// Returns the number of NaN values at the start of ATR output.
///
/// ```
/// use trendcast::indicators::atr::atr_lookback;
///
/// assert_eq!(atr_lookback(14), 13);
/// ```
#[inline]
#[must_use]
pub const fn atr_lookback(period: usize) -> usize {
    rolling_lookback(period)
}

/// Computes the True Range for each bar.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::LengthMismatch` if the inputs differ in length
#[must_use = "this returns a Result with the True Range values, which should be used"]
pub fn true_range<T: SeriesElement>(high: &[T], low: &[T], close: &[T]) -> Result<Vec<T>> {
    validate_ohlc_inputs(high, low, close)?;

    let mut tr = Vec::with_capacity(high.len());
    tr.push(high[0] - low[0]);
    for i in 1..high.len() {
        tr.push(compute_true_range(high[i], low[i], close[i - 1]));
    }
    Ok(tr)
}

/// Computes the Average True Range.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::LengthMismatch` if the inputs differ in length
/// - `Error::InvalidPeriod` if the period is zero
#[must_use = "this returns a Result with the ATR values, which should be used"]
pub fn atr<T: SeriesElement>(high: &[T], low: &[T], close: &[T], period: usize) -> Result<Vec<T>> {
    validate_period(period)?;
    let tr = true_range(high, low, close)?;
    rolling_mean(&tr, period)
}

fn validate_ohlc_inputs<T: SeriesElement>(high: &[T], low: &[T], close: &[T]) -> Result<()> {
    validate_same_length(&[("high", high), ("low", low), ("close", close)])
}

/// True Range of one bar given the previous close.
///
/// NaN in any operand yields NaN (`max` alone would silently drop it).
#[inline]
fn compute_true_range<T: SeriesElement>(high: T, low: T, prev_close: T) -> T {
    if high.is_nan() || low.is_nan() || prev_close.is_nan() {
        return T::nan();
    }
    let span = high - low;
    let gap_up = (high - prev_close).abs();
    let gap_down = (low - prev_close).abs();
    span.max(gap_up).max(gap_down)
}
