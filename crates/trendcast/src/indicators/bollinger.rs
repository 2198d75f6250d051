//! Bollinger Bands indicator.
//!
//! Bollinger Bands put an envelope of `k` standard deviations around a simple
//! moving average:
//! - **Middle Band**: SMA of the price
//! - **Upper Band**: middle + k × σ
//! - **Lower Band**: middle − k × σ
//!
//! # Conventions
//!
//! - **Sample standard deviation**: σ uses the Bessel-corrected divisor
//!   `period - 1`, so the window must hold at least two values. Charting
//!   packages that use the population form draw slightly narrower bands.
//! - **Shifted sums**: mean and σ come from
//!   [`rolling_mean_std`](crate::kernels::rolling_sum::rolling_mean_std),
//!   which accumulates deviations from the first observation. A window of
//!   identical prices therefore collapses all three bands onto the price
//!   exactly, even at large price levels.
//!
//! # Formula
//!
//! ```text
//! middle = SMA(price, period)
//! σ      = sqrt(Σ (price - middle)² / (period - 1))
//! upper  = middle + k × σ
//! lower  = middle - k × σ
//! ```
//!
//! # Example
//!
//! ```
//! use trendcast::indicators::bollinger::bollinger;
//!
//! let data = vec![20.0_f64, 21.0, 22.0, 21.5, 22.5, 23.0, 22.0, 21.0, 20.5, 21.5];
//! let result = bollinger(&data, 5, 2.0).unwrap();
//!
//! assert!(result.middle[3].is_nan());
//! assert!(result.upper[4] > result.middle[4]);
//! assert!(result.middle[4] > result.lower[4]);
//! ```

use crate::error::{Error, Result};
use crate::kernels::rolling_sum::{rolling_lookback, rolling_mean_std};
use crate::traits::SeriesElement;

/// Returns the number of NaN values at the start of Bollinger output.
///
/// ```
/// use trendcast::indicators::bollinger::bollinger_lookback;
///
/// assert_eq!(bollinger_lookback(20), 19);
/// ```
#[inline]
#[must_use]
pub const fn bollinger_lookback(period: usize) -> usize {
    rolling_lookback(period)
}

/// The three bands, each as long as the input.
#[derive(Debug, Clone)]
pub struct BollingerOutput<T> {
    /// The middle band (SMA).
    pub middle: Vec<T>,
    /// The upper band (middle + k × σ).
    pub upper: Vec<T>,
    /// The lower band (middle − k × σ).
    pub lower: Vec<T>,
}

/// Computes Bollinger Bands with window `period` and multiplier `num_std_dev`.
///
/// An input shorter than `period` yields all-NaN bands.
///
/// # Errors
///
/// - `Error::EmptyInput` if the input is empty
/// - `Error::InvalidPeriod` if `period < 2`
/// - `Error::InvalidParameter` if `num_std_dev` is negative or not finite
#[must_use = "this returns a Result with Bollinger Bands values, which should be used"]
pub fn bollinger<T: SeriesElement>(
    data: &[T],
    period: usize,
    num_std_dev: T,
) -> Result<BollingerOutput<T>> {
    if !num_std_dev.is_finite() || num_std_dev < T::zero() {
        return Err(Error::InvalidParameter {
            name: "num_std_dev",
            reason: "band multiplier must be finite and non-negative",
        });
    }

    let stats = rolling_mean_std(data, period)?;
    let (upper, lower): (Vec<T>, Vec<T>) = stats
        .mean
        .iter()
        .zip(&stats.std_dev)
        .map(|(&mid, &sd)| {
            let width = num_std_dev * sd;
            (mid + width, mid - width)
        })
        .unzip();

    Ok(BollingerOutput {
        middle: stats.mean,
        upper,
        lower,
    })
}

/// Builder-style configuration for Bollinger Bands.
///
/// ```
/// use trendcast::indicators::bollinger::Bollinger;
///
/// let data: Vec<f64> = (0..40).map(|i| 100.0 + (i % 5) as f64).collect();
/// let bands = Bollinger::new().period(10).std_dev(1.5).compute(&data).unwrap();
/// assert_eq!(bands.middle.len(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bollinger {
    period: usize,
    std_dev: f64,
}

impl Default for Bollinger {
    /// Standard parameters (20, 2.0).
    fn default() -> Self {
        Self {
            period: 20,
            std_dev: 2.0,
        }
    }
}

impl Bollinger {
    /// Creates a configuration with standard parameters (20, 2.0).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window length.
    ///
    /// Default: 20
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the standard deviation multiplier.
    ///
    /// Default: 2.0
    #[must_use]
    pub const fn std_dev(mut self, std_dev: f64) -> Self {
        self.std_dev = std_dev;
        self
    }

    /// Returns the configured window length.
    #[must_use]
    pub const fn get_period(&self) -> usize {
        self.period
    }

    /// Computes the bands using the configured parameters.
    ///
    /// # Errors
    ///
    /// Same as [`bollinger`], plus `Error::NumericConversion` if the
    /// multiplier does not fit `T`.
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<BollingerOutput<T>> {
        let std_dev = T::from_f64(self.std_dev)?;
        bollinger(data, self.period, std_dev)
    }
}
