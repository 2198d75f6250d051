//! Exponential Moving Average (EMA) indicator.
//!
//! The EMA weights recent values more heavily than the SMA. This
//! implementation is seeded with the first observation, so it is defined
//! from index 0 and has no warm-up prefix (the "adjust = false" convention
//! of most charting packages):
//!
//! ```text
//! α       = 2 / (span + 1)
//! EMA[0]  = x[0]
//! EMA[i]  = α × x[i] + (1 - α) × EMA[i-1]
//! ```
//!
//! A NaN input poisons every later value, since each output depends on the
//! previous one.
//!
//! # Example
//!
//! ```
//! use trendcast::indicators::ema::ema;
//!
//! let data = vec![10.0_f64, 11.0, 12.0];
//! let result = ema(&data, 3).unwrap(); // α = 0.5
//!
//! assert!((result[0] - 10.0).abs() < 1e-10);
//! assert!((result[1] - 10.5).abs() < 1e-10);
//! assert!((result[2] - 11.25).abs() < 1e-10);
//! ```

use crate::error::{Error, Result};
use crate::traits::{validate_kernel_input, SeriesElement};

/// Returns the number of NaN values at the start of EMA output (always 0).
#[inline]
#[must_use]
pub const fn ema_lookback(_span: usize) -> usize {
    0
}

/// Computes the EMA with standard smoothing `α = 2 / (span + 1)`.
///
/// # Errors
///
/// - `Error::EmptyInput` if the input is empty
/// - `Error::InvalidPeriod` if the span is zero
#[must_use = "this returns a Result with the EMA values, which should be used"]
pub fn ema<T: SeriesElement>(data: &[T], span: usize) -> Result<Vec<T>> {
    let alpha = compute_standard_alpha::<T>(span)?;
    ema_with_alpha(data, alpha)
}

/// Computes the EMA with a caller-chosen smoothing factor.
///
/// # Errors
///
/// - `Error::EmptyInput` if the input is empty
/// - `Error::InvalidParameter` unless `0 < alpha <= 1`
#[must_use = "this returns a Result with the EMA values, which should be used"]
pub fn ema_with_alpha<T: SeriesElement>(data: &[T], alpha: T) -> Result<Vec<T>> {
    validate_kernel_input(data, 1)?;
    if !(alpha > T::zero() && alpha <= T::one()) {
        return Err(Error::InvalidParameter {
            name: "alpha",
            reason: "smoothing factor must lie in (0, 1]",
        });
    }

    let mut output = Vec::with_capacity(data.len());
    compute_ema_core(data, alpha, &mut output);
    Ok(output)
}

/// Computes the standard EMA smoothing factor: α = 2 / (span + 1)
fn compute_standard_alpha<T: SeriesElement>(span: usize) -> Result<T> {
    if span == 0 {
        return Err(Error::InvalidPeriod {
            period: span,
            reason: "span must be at least 1",
        });
    }
    Ok(T::two() / T::from_usize(span + 1)?)
}

/// Recursive smoothing; expects a non-empty input.
fn compute_ema_core<T: SeriesElement>(data: &[T], alpha: T, output: &mut Vec<T>) {
    let one_minus_alpha = T::one() - alpha;
    let mut prev = data[0];
    output.push(prev);
    for &value in &data[1..] {
        prev = alpha * value + one_minus_alpha * prev;
        output.push(prev);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::utils::{approx_eq, EPSILON};

    #[test]
    fn test_ema_seeded_at_first_value() {
        let data = vec![100.0_f64, 110.0, 90.0];
        let result = ema(&data, 12).unwrap();
        assert_eq!(result[0], 100.0);
        let alpha = 2.0 / 13.0;
        let e1 = alpha * 110.0 + (1.0 - alpha) * 100.0;
        let e2 = alpha * 90.0 + (1.0 - alpha) * e1;
        assert!(approx_eq(result[1], e1, EPSILON));
        assert!(approx_eq(result[2], e2, EPSILON));
    }

    #[test]
    fn test_ema_span_one_is_identity() {
        let data = vec![5.0_f64, 7.0, 2.0, 9.0];
        let result = ema(&data, 1).unwrap();
        assert_eq!(result, data);
    }

    #[test]
    fn test_ema_constant_input() {
        let data = vec![42.0_f64; 50];
        let result = ema(&data, 26).unwrap();
        assert!(result.iter().all(|&v| approx_eq(v, 42.0, EPSILON)));
    }

    #[test]
    fn test_ema_single_value() {
        let result = ema(&[3.5_f64], 26).unwrap();
        assert_eq!(result, vec![3.5]);
    }

    #[test]
    fn test_ema_no_warmup() {
        let data: Vec<f64> = (1..=30).map(f64::from).collect();
        let result = ema(&data, 26).unwrap();
        assert!(result.iter().all(|v| !v.is_nan()));
        assert_eq!(ema_lookback(26), 0);
    }

    #[test]
    fn test_ema_tracks_trend_with_lag() {
        let data: Vec<f64> = (1..=40).map(f64::from).collect();
        let result = ema(&data, 12).unwrap();
        for i in 1..data.len() {
            assert!(result[i] < data[i]);
            assert!(result[i] > result[i - 1]);
        }
    }

    #[test]
    fn test_ema_nan_poisons_forward() {
        let data = vec![1.0_f64, f64::NAN, 3.0];
        let result = ema(&data, 3).unwrap();
        assert!(!result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
    }

    #[test]
    fn test_ema_errors() {
        assert!(matches!(ema::<f64>(&[], 3), Err(Error::EmptyInput)));
        assert!(matches!(
            ema(&[1.0_f64], 0),
            Err(Error::InvalidPeriod { .. })
        ));
        assert!(matches!(
            ema_with_alpha(&[1.0_f64], 1.5),
            Err(Error::InvalidParameter { name: "alpha", .. })
        ));
        assert!(matches!(
            ema_with_alpha(&[1.0_f64], 0.0),
            Err(Error::InvalidParameter { .. })
        ));
    }
}
