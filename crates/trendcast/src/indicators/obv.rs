//! On-Balance Volume (OBV) indicator.
//!
//! OBV is a running total of volume signed by the direction of the close:
//!
//! ```text
//! OBV[0] = 0
//! OBV[i] = OBV[i-1] + volume[i]   if close[i] > close[i-1]
//! OBV[i] = OBV[i-1] - volume[i]   if close[i] < close[i-1]
//! OBV[i] = OBV[i-1]               otherwise
//! ```
//!
//! The series starts at zero rather than at the first bar's volume, so only
//! the direction of change matters and the absolute level is arbitrary.
//! It is a single scan over adjacent pairs with one accumulator.
//!
//! A NaN close or volume leaves the total unchanged for that step.
//!
//! # Example
//!
//! ```
//! use trendcast::indicators::obv::obv;
//!
//! let close = vec![10.0_f64, 10.5, 10.2, 10.2, 10.8];
//! let volume = vec![1000.0, 1500.0, 1200.0, 900.0, 1800.0];
//!
//! let result = obv(&close, &volume).unwrap();
//! assert_eq!(result, vec![0.0, 1500.0, 300.0, 300.0, 2100.0]);
//! ```

use std::iter;

use crate::error::Result;
use crate::traits::{validate_same_length, SeriesElement};

/// Returns the number of NaN values at the start of OBV output (always 0).
#[inline]
#[must_use]
pub const fn obv_lookback() -> usize {
    0
}

/// Computes On-Balance Volume.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::LengthMismatch` if the inputs differ in length
#[must_use = "this returns a Result with OBV values, which should be used"]
pub fn obv<T: SeriesElement>(close: &[T], volume: &[T]) -> Result<Vec<T>> {
    validate_same_length(&[("close", close), ("volume", volume)])?;

    let steps = close
        .windows(2)
        .zip(&volume[1..])
        .scan(T::zero(), |total, (pair, &vol)| {
            *total = compute_obv_step(*total, pair[0], pair[1], vol);
            Some(*total)
        });

    Ok(iter::once(T::zero()).chain(steps).collect())
}

/// Applies one bar to the running total.
#[inline]
fn compute_obv_step<T: SeriesElement>(total: T, prev_close: T, close: T, volume: T) -> T {
    if prev_close.is_nan() || close.is_nan() || volume.is_nan() {
        return total;
    }
    if close > prev_close {
        total + volume
    } else if close < prev_close {
        total - volume
    } else {
        total
    }
}
