//! Relative Strength Index (RSI) indicator.
//!
//! RSI compares the average size of up-moves with the average size of
//! down-moves over a trailing window and maps the ratio onto [0, 100].
//! Averages here are simple moving averages of the per-bar gains and losses
//! (not Wilder's smoothing).
//!
//! # Formula
//!
//! ```text
//! delta[i] = close[i] - close[i-1]          (undefined for i = 0)
//! gain[i]  = max(delta[i], 0)
//! loss[i]  = max(-delta[i], 0)
//! avg_gain = SMA(gain, period)
//! avg_loss = SMA(loss, period)
//! RSI      = 100 - 100 / (1 + avg_gain / avg_loss)
//! ```
//!
//! Because `delta[0]` is undefined, the first `period` outputs are NaN.
//!
//! # Zero-loss policy
//!
//! When `avg_loss` is zero the ratio is undefined. RSI is then **100**,
//! including the flat case where `avg_gain` is zero as well. RSI never
//! evaluates to NaN or infinity for finite input.
//!
//! # Example
//!
//! ```
//! use trendcast::indicators::rsi::rsi;
//!
//! let rising: Vec<f64> = (1..=20).map(f64::from).collect();
//! let result = rsi(&rising, 14).unwrap();
//! assert!(result[13].is_nan());
//! assert!((result[14] - 100.0).abs() < 1e-10);
//! ```

use crate::error::Result;
use crate::kernels::rolling_sum::rolling_mean;
use crate::traits::{validate_kernel_input, SeriesElement};

/// Returns the number of NaN values at the start of RSI output.
///
/// ```
/// use trendcast::indicators::rsi::rsi_lookback;
///
/// assert_eq!(rsi_lookback(14), 14);
/// ```
#[inline]
#[must_use]
pub const fn rsi_lookback(period: usize) -> usize {
    period
}

/// Computes the Relative Strength Index.
///
/// # Errors
///
/// - `Error::EmptyInput` if the input is empty
/// - `Error::InvalidPeriod` if the period is zero
#[must_use = "this returns a Result with the RSI values, which should be used"]
pub fn rsi<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_kernel_input(data, period)?;

    let n = data.len();
    let mut gains = Vec::with_capacity(n);
    let mut losses = Vec::with_capacity(n);
    gains.push(T::nan());
    losses.push(T::nan());
    for pair in data.windows(2) {
        let delta = pair[1] - pair[0];
        if delta.is_nan() {
            // keep the NaN so every window touching it is undefined
            gains.push(T::nan());
            losses.push(T::nan());
        } else {
            gains.push(delta.max(T::zero()));
            losses.push((-delta).max(T::zero()));
        }
    }

    let avg_gain = rolling_mean(&gains, period)?;
    let avg_loss = rolling_mean(&losses, period)?;

    let hundred = T::hundred();
    Ok(avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| compute_rsi_value(g, l, hundred))
        .collect())
}

/// Maps average gain and loss to an RSI value.
///
/// - `avg_loss == 0`: 100 (policy, see module docs)
/// - `avg_gain == 0`: 0
/// - otherwise `100 - 100 / (1 + avg_gain / avg_loss)`
///
/// Running sums can leave a residue of order 1e-17 below zero, so both
/// averages are clamped at zero first.
#[inline]
fn compute_rsi_value<T: SeriesElement>(avg_gain: T, avg_loss: T, hundred: T) -> T {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        return T::nan();
    }
    let zero = T::zero();
    let avg_gain = avg_gain.max(zero);
    let avg_loss = avg_loss.max(zero);

    if avg_loss == zero {
        hundred
    } else if avg_gain == zero {
        zero
    } else {
        let rs = avg_gain / avg_loss;
        hundred - hundred / (T::one() + rs)
    }
}
