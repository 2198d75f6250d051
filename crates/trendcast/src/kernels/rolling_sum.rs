//! Rolling mean and sample standard deviation from shifted running sums.
//!
//! A naive rolling sum of squares suffers catastrophic cancellation when the
//! window variance is small relative to the price level (e.g. a stock trading
//! near 4000 with a few points of daily movement). [`RollingWindow`] instead
//! accumulates deviations from a fixed shift `K` (the first value it sees):
//!
//! ```text
//! S1 = Σ (x - K)          S2 = Σ (x - K)²
//! mean     = K + S1 / n
//! variance = (S2 - S1² / n) / (n - 1)      (sample, Bessel-corrected)
//! ```
//!
//! Both sums are updated in O(1) per element by adding the entering value and
//! subtracting the leaving one. Add/remove cycles leave rounding residue in
//! the sums, so the accumulator also tracks the run of identical values at
//! the end of the window. Once that run covers the whole window, the shift is
//! re-anchored to the repeated value and both sums reset to zero: a window of
//! identical values then has a mean equal to that value and a variance of
//! exactly zero, whatever came before it.
//!
//! ```
//! use trendcast::kernels::rolling_sum::rolling_mean_std;
//!
//! let data = vec![2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! let out = rolling_mean_std(&data, 8).unwrap();
//! assert!((out.mean[7] - 5.0).abs() < 1e-10);
//! assert!((out.std_dev[7] - (32.0_f64 / 7.0).sqrt()).abs() < 1e-10);
//! ```

use crate::error::{Error, Result};
use crate::traits::{validate_kernel_input, SeriesElement};

/// O(1)-update accumulator over a fixed-size trailing window.
///
/// The caller supplies the value leaving the window on each push; the
/// accumulator itself stores no history.
#[derive(Debug, Clone, Copy)]
pub struct RollingWindow<T> {
    shift: Option<T>,
    count: usize,
    nan_count: usize,
    sum: T,
    sum_sq: T,
    last: Option<T>,
    run: usize,
}

impl<T: SeriesElement> Default for RollingWindow<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SeriesElement> RollingWindow<T> {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shift: None,
            count: 0,
            nan_count: 0,
            sum: T::zero(),
            sum_sq: T::zero(),
            last: None,
            run: 0,
        }
    }

    /// Adds `entering` and removes `leaving` (if the window was already full).
    #[inline]
    #[allow(clippy::float_cmp)]
    pub fn push(&mut self, entering: T, leaving: Option<T>) {
        if entering.is_nan() {
            self.nan_count += 1;
            self.last = None;
            self.run = 0;
        } else {
            self.run = if self.last == Some(entering) {
                self.run + 1
            } else {
                1
            };
            self.last = Some(entering);
            let shift = *self.shift.get_or_insert(entering);
            let d = entering - shift;
            self.sum = self.sum + d;
            self.sum_sq = self.sum_sq + d * d;
        }
        self.count += 1;

        if let Some(old) = leaving {
            if old.is_nan() {
                self.nan_count -= 1;
            } else if let Some(shift) = self.shift {
                let d = old - shift;
                self.sum = self.sum - d;
                self.sum_sq = self.sum_sq - d * d;
            }
            self.count -= 1;
        }

        // every value in the window equals `last`
        if self.nan_count == 0 && self.run >= self.count {
            if let Some(value) = self.last {
                self.shift = Some(value);
                self.sum = T::zero();
                self.sum_sq = T::zero();
            }
        }
    }

    /// Number of values currently in the window.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Window mean, or NaN if the window is empty or holds a NaN.
    #[inline]
    #[must_use]
    pub fn mean(&self) -> T {
        match (self.shift, self.count, self.nan_count) {
            (Some(shift), count, 0) if count > 0 => match T::from_usize(count) {
                Ok(n) => shift + self.sum / n,
                Err(_) => T::nan(),
            },
            _ => T::nan(),
        }
    }

    /// Sample variance (divisor `n - 1`), or NaN with fewer than two values
    /// or a NaN in the window. Rounding residue below zero is clamped to zero.
    #[inline]
    #[must_use]
    pub fn sample_variance(&self) -> T {
        if self.count < 2 || self.nan_count > 0 {
            return T::nan();
        }
        let (Ok(n), Ok(n_minus_one)) = (T::from_usize(self.count), T::from_usize(self.count - 1))
        else {
            return T::nan();
        };
        let variance = (self.sum_sq - self.sum * self.sum / n) / n_minus_one;
        if variance < T::zero() {
            T::zero()
        } else {
            variance
        }
    }

    /// Sample standard deviation.
    #[inline]
    #[must_use]
    pub fn sample_std_dev(&self) -> T {
        self.sample_variance().sqrt()
    }
}

/// Output of [`rolling_mean_std`].
#[derive(Debug, Clone)]
pub struct RollingMeanStd<T> {
    /// Rolling mean; NaN for the first `period - 1` values.
    pub mean: Vec<T>,
    /// Rolling sample standard deviation; NaN for the first `period - 1` values.
    pub std_dev: Vec<T>,
}

/// Number of NaN values at the start of rolling output.
#[inline]
#[must_use]
pub const fn rolling_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Computes the rolling mean over `period` values.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is zero
pub fn rolling_mean<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_kernel_input(data, period)?;
    let lookback = rolling_lookback(period);
    let mut window = RollingWindow::new();
    let mut output = vec![T::nan(); data.len()];
    for (i, &value) in data.iter().enumerate() {
        let leaving = (i >= period).then(|| data[i - period]);
        window.push(value, leaving);
        if i >= lookback {
            output[i] = window.mean();
        }
    }
    Ok(output)
}

/// Computes the rolling mean and sample standard deviation over `period` values.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is below 2 (a sample deviation needs
///   at least two observations)
pub fn rolling_mean_std<T: SeriesElement>(data: &[T], period: usize) -> Result<RollingMeanStd<T>> {
    validate_kernel_input(data, period)?;
    if period < 2 {
        return Err(Error::InvalidPeriod {
            period,
            reason: "sample standard deviation needs a window of at least 2",
        });
    }

    let n = data.len();
    let lookback = rolling_lookback(period);
    let mut window = RollingWindow::new();
    let mut output = RollingMeanStd {
        mean: vec![T::nan(); n],
        std_dev: vec![T::nan(); n],
    };

    for (i, &value) in data.iter().enumerate() {
        let leaving = (i >= period).then(|| data[i - period]);
        window.push(value, leaving);
        if i >= lookback {
            output.mean[i] = window.mean();
            output.std_dev[i] = window.sample_std_dev();
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::utils::{approx_eq, EPSILON};

    fn naive_sample_std(window: &[f64]) -> f64 {
        let n = window.len() as f64;
        let mean = window.iter().sum::<f64>() / n;
        let ss: f64 = window.iter().map(|x| (x - mean).powi(2)).sum();
        (ss / (n - 1.0)).sqrt()
    }

    #[test]
    fn test_rolling_mean_basic() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let result = rolling_mean(&data, 3).unwrap();
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(approx_eq(result[2], 2.0, EPSILON));
        assert!(approx_eq(result[3], 3.0, EPSILON));
        assert!(approx_eq(result[4], 4.0, EPSILON));
    }

    #[test]
    fn test_rolling_std_matches_naive() {
        let data = vec![44.0, 44.5, 43.5, 44.5, 44.0, 43.0, 42.5, 43.5, 44.5, 45.0, 45.5];
        let out = rolling_mean_std(&data, 4).unwrap();
        for i in 3..data.len() {
            let expected = naive_sample_std(&data[i - 3..=i]);
            assert!(approx_eq(out.std_dev[i], expected, 1e-9), "i={i}");
        }
    }

    #[test]
    fn test_constant_window_has_zero_std() {
        let data = vec![4123.25_f64; 30];
        let out = rolling_mean_std(&data, 20).unwrap();
        assert_eq!(out.std_dev[29], 0.0);
        assert_eq!(out.mean[29], 4123.25);
    }

    #[test]
    fn test_flat_tail_after_noise_has_zero_std() {
        let mut state = 0x2545_f491_u64;
        let mut data: Vec<f64> = (0..300)
            .map(|_| {
                state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                100.0 + ((state >> 11) as f64 / (1u64 << 53) as f64 - 0.5) * 8.0
            })
            .collect();
        data.extend(std::iter::repeat(101.37).take(30));

        let out = rolling_mean_std(&data, 20).unwrap();
        for i in 319..330 {
            assert_eq!(out.std_dev[i], 0.0, "i={i}");
            assert_eq!(out.mean[i], 101.37, "i={i}");
        }
        // leaving the flat stretch picks the deviation back up
        data.push(105.0);
        let out = rolling_mean_std(&data, 20).unwrap();
        let expected = naive_sample_std(&data[311..331]);
        assert!(approx_eq(out.std_dev[330], expected, 1e-9));
    }

    #[test]
    fn test_run_shorter_than_window_is_not_flat() {
        let data = vec![1.0_f64, 5.0, 5.0, 5.0];
        let out = rolling_mean_std(&data, 4).unwrap();
        assert!(out.std_dev[3] > 0.0);
        assert!(approx_eq(out.mean[3], 4.0, EPSILON));
    }

    #[test]
    fn test_high_level_small_variance_is_stable() {
        // large offset with tiny movement
        let data: Vec<f64> = (0..50).map(|i| 1.0e9 + (i % 2) as f64).collect();
        let out = rolling_mean_std(&data, 20).unwrap();
        let expected = naive_sample_std(&data[30..50]);
        assert!(approx_eq(out.std_dev[49], expected, 1e-6));
    }

    #[test]
    fn test_nan_in_window_propagates() {
        let data = vec![1.0_f64, f64::NAN, 3.0, 4.0, 5.0];
        let result = rolling_mean(&data, 2).unwrap();
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert!(approx_eq(result[3], 3.5, EPSILON));
    }

    #[test]
    fn test_short_input_is_all_nan() {
        let result = rolling_mean(&[1.0_f64, 2.0, 3.0], 10).unwrap();
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_std_requires_two() {
        assert!(matches!(
            rolling_mean_std(&[1.0_f64, 2.0], 1),
            Err(Error::InvalidPeriod { period: 1, .. })
        ));
    }
}
