//! Stochastic Oscillator indicator.
//!
//! The oscillator locates the close inside the recent high-low range on a
//! [0, 100] scale. %D smooths %K with a short simple moving average.
//!
//! # Formula
//!
//! ```text
//! HH = highest high over k_period
//! LL = lowest low over k_period
//! %K = 100 × (close - LL) / (HH - LL)
//! %D = SMA(%K, d_period)
//! ```
//!
//! %K is defined from index `k_period - 1`, %D from `k_period + d_period - 2`.
//! The rolling extrema come from the O(n) monotonic-deque kernel in
//! [`rolling_extrema`](crate::kernels::rolling_extrema).
//!
//! # Flat range
//!
//! When `HH == LL` the ratio is 0/0. %K is then **50**, the midpoint of the
//! scale. NaN in the window still yields NaN.
//!
//! # Example
//!
//! ```
//! use trendcast::indicators::stochastic::stochastic;
//!
//! let high = vec![10.0_f64, 11.0, 12.0, 11.5, 12.5, 13.0, 12.0, 11.0];
//! let low = vec![9.0_f64, 10.0, 11.0, 10.5, 11.5, 12.0, 11.0, 10.0];
//! let close = vec![9.5_f64, 10.5, 11.5, 11.0, 12.0, 12.5, 11.5, 10.5];
//!
//! let out = stochastic(&high, &low, &close, 5, 3).unwrap();
//! assert!(out.k[3].is_nan());
//! assert!(!out.k[4].is_nan());
//! assert!(out.d[5].is_nan());
//! assert!(!out.d[6].is_nan());
//! ```

use crate::error::Result;
use crate::kernels::rolling_extrema::{rolling_extrema, rolling_extrema_lookback};
use crate::kernels::rolling_sum::rolling_mean;
use crate::traits::{validate_period, validate_same_length, SeriesElement};

/// Returns the number of NaN values at the start of %K.
///
/// ```
/// use trendcast::indicators::stochastic::stochastic_k_lookback;
///
/// assert_eq!(stochastic_k_lookback(14), 13);
/// ```
#[inline]
#[must_use]
pub const fn stochastic_k_lookback(k_period: usize) -> usize {
    rolling_extrema_lookback(k_period)
}

/// Returns the number of NaN values at the start of %D.
///
/// ```
/// use trendcast::indicators::stochastic::stochastic_d_lookback;
///
/// assert_eq!(stochastic_d_lookback(14, 3), 15);
/// ```
#[inline]
#[must_use]
pub const fn stochastic_d_lookback(k_period: usize, d_period: usize) -> usize {
    stochastic_k_lookback(k_period) + d_period.saturating_sub(1)
}

/// %K and %D lines, each as long as the input.
#[derive(Debug, Clone)]
pub struct StochasticOutput<T> {
    /// Position of the close in the range, 0 to 100.
    pub k: Vec<T>,
    /// Simple moving average of %K.
    pub d: Vec<T>,
}

/// Computes the Stochastic Oscillator.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::LengthMismatch` if the inputs differ in length
/// - `Error::InvalidPeriod` if either period is zero
#[must_use = "this returns a Result with the Stochastic output, which should be used"]
pub fn stochastic<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    k_period: usize,
    d_period: usize,
) -> Result<StochasticOutput<T>> {
    validate_same_length(&[("high", high), ("low", low), ("close", close)])?;
    validate_period(k_period)?;
    validate_period(d_period)?;

    let extrema = rolling_extrema(high, low, k_period)?;
    let hundred = T::hundred();
    let fifty = T::fifty();
    let k: Vec<T> = close
        .iter()
        .zip(extrema.max.iter().zip(&extrema.min))
        .map(|(&c, (&hh, &ll))| compute_k_value(c, hh, ll, hundred, fifty))
        .collect();

    // the NaN prefix of %K keeps %D undefined until d_period values exist
    let d = rolling_mean(&k, d_period)?;

    Ok(StochasticOutput { k, d })
}

#[inline]
fn compute_k_value<T: SeriesElement>(close: T, hh: T, ll: T, hundred: T, fifty: T) -> T {
    if close.is_nan() || hh.is_nan() || ll.is_nan() {
        return T::nan();
    }
    let range = hh - ll;
    if range <= T::zero() {
        fifty
    } else {
        hundred * (close - ll) / range
    }
}
