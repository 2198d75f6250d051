//! Williams %R indicator.
//!
//! Williams %R measures how far the close sits below the recent highest high,
//! on a [−100, 0] scale. It is the Stochastic %K flipped and shifted down by
//! 100.
//!
//! ```text
//! %R = -100 × (HH - close) / (HH - LL)
//! ```
//!
//! When `HH == LL` the value is **−50**, the midpoint of the scale.
//!
//! # Example
//!
//! ```
//! use trendcast::indicators::williams_r::williams_r;
//!
//! let high = vec![10.0_f64, 12.0, 11.0];
//! let low = vec![8.0_f64, 9.0, 9.5];
//! let close = vec![9.0_f64, 11.0, 11.0];
//!
//! let result = williams_r(&high, &low, &close, 3).unwrap();
//! assert!((result[2] + 25.0).abs() < 1e-10);
//! ```

use crate::error::Result;
use crate::kernels::rolling_extrema::{rolling_extrema, rolling_extrema_lookback};
use crate::traits::{validate_period, validate_same_length, SeriesElement};

/// Returns the number of NaN values at the start of Williams %R output.
#[inline]
#[must_use]
pub const fn williams_r_lookback(period: usize) -> usize {
    rolling_extrema_lookback(period)
}

/// Computes Williams %R.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::LengthMismatch` if the inputs differ in length
/// - `Error::InvalidPeriod` if the period is zero
#[must_use = "this returns a Result with the Williams %R values, which should be used"]
pub fn williams_r<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    validate_same_length(&[("high", high), ("low", low), ("close", close)])?;
    validate_period(period)?;

    let extrema = rolling_extrema(high, low, period)?;
    let neg_hundred = -T::hundred();
    let neg_fifty = -T::fifty();

    Ok(close
        .iter()
        .zip(extrema.max.iter().zip(&extrema.min))
        .map(|(&c, (&hh, &ll))| {
            if c.is_nan() || hh.is_nan() || ll.is_nan() {
                return T::nan();
            }
            let range = hh - ll;
            if range <= T::zero() {
                neg_fifty
            } else {
                neg_hundred * (hh - c) / range
            }
        })
        .collect())
}
