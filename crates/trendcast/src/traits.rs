//! Core traits for trendcast numeric kernels.
//!
//! The indicator kernels are generic over [`SeriesElement`], which abstracts
//! over `f32` and `f64`. The engine itself works in `f64`; the generic kernels
//! are public so callers can run them on their own columns.
//!
//! # Example
//!
//! ```
//! use trendcast::traits::{validate_kernel_input, SeriesElement};
//!
//! fn window_mean<T: SeriesElement>(data: &[T], period: usize) -> trendcast::Result<T> {
//!     validate_kernel_input(data, period)?;
//!     let take = period.min(data.len());
//!     let sum = data.iter().take(take).fold(T::zero(), |acc, &x| acc + x);
//!     Ok(sum / T::from_usize(take)?)
//! }
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! assert!((window_mean(&data, 3).unwrap() - 2.0).abs() < 1e-10);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A trait for types that can be used as elements in a data series.
///
/// Blanket-implemented for every `Float + NumCast + Copy + Default + Send + Sync`
/// type, which in practice means `f32` and `f64`.
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Returns the constant 2 as this type.
    ///
    /// Used in EMA smoothing: `alpha = 2 / (span + 1)`.
    #[inline]
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Returns the constant 100 as this type.
    ///
    /// Used by the percentage oscillators (RSI, Stochastic, Williams %R).
    #[inline]
    #[must_use]
    fn hundred() -> Self {
        let two = Self::two();
        let ten = two * two * two + two;
        ten * ten
    }

    /// Returns the constant 50 as this type.
    ///
    /// Neutral midpoint of the [0, 100] oscillators.
    #[inline]
    #[must_use]
    fn fifty() -> Self {
        Self::hundred() / Self::two()
    }
}

impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

/// Validates that a period is non-zero.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if the period is zero.
#[inline]
pub const fn validate_period(period: usize) -> Result<()> {
    if period == 0 {
        Err(Error::InvalidPeriod {
            period,
            reason: "period must be at least 1",
        })
    } else {
        Ok(())
    }
}

/// Validates the common preconditions of a single-input kernel.
///
/// Kernels accept inputs shorter than their window (the output is then all
/// NaN), so only emptiness and a zero period are rejected.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if the period is zero
/// - `Error::EmptyInput` if the data is empty
#[inline]
pub fn validate_kernel_input<T: SeriesElement>(data: &[T], period: usize) -> Result<()> {
    validate_period(period)?;
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(())
}

/// Validates that parallel columns are non-empty and equally long.
///
/// # Errors
///
/// - `Error::EmptyInput` if the first column is empty
/// - `Error::LengthMismatch` naming the first column that disagrees
pub fn validate_same_length<T: SeriesElement>(columns: &[(&'static str, &[T])]) -> Result<()> {
    let Some(&(first_name, first)) = columns.first() else {
        return Err(Error::EmptyInput);
    };
    if first.is_empty() {
        return Err(Error::EmptyInput);
    }
    for &(name, column) in &columns[1..] {
        if column.len() != first.len() {
            return Err(Error::LengthMismatch {
                description: format!(
                    "{first_name} has {} elements, {name} has {}",
                    first.len(),
                    column.len()
                ),
            });
        }
    }
    Ok(())
}
