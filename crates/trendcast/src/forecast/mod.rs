//! Polynomial trend forecaster.
//!
//! The forecaster regresses the closing price on elapsed calendar days and
//! extrapolates the fitted polynomial over the days after the last bar.
//!
//! # Algorithm
//!
//! ```text
//! t[i]  = days between series[0] and series[i]
//! u[i]  = (t[i] - c) / s          c = t_max / 2, s = t_max / 2 (1 if zero)
//! close ≈ β0 + β1·u + … + βD·u^D  (least squares, Householder QR)
//! ```
//!
//! Rescaling `t` onto [−1, 1] keeps the Vandermonde columns of comparable
//! size, so high degrees over long histories stay well conditioned.
//! The fit never forms the normal equations.
//!
//! Future dates are calendar days, not trading days: a horizon of `H` yields
//! exactly `H` points, dated `last + 1 … last + H`.
//!
//! # Example
//!
//! ```
//! use chrono::{Days, NaiveDate};
//! use trendcast::forecast::forecast;
//! use trendcast::PriceBar;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let series: Vec<PriceBar> = (0..10)
//!     .map(|i| {
//!         let close = 50.0 + 2.0 * i as f64;
//!         PriceBar::new(start + Days::new(i), close, close, close, close, 100)
//!     })
//!     .collect();
//!
//! let result = forecast(&series, 5, 1).unwrap();
//! assert_eq!(result.future.len(), 5);
//! assert_eq!(result.future[0].date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
//! assert!((result.future[0].predicted_close - 70.0).abs() < 1e-6);
//! ```

mod polyfit;

use chrono::{Days, NaiveDate};

use crate::error::{Error, Result};
use crate::series::{validate_series, PriceBar};

/// Largest horizon accepted by [`ForecastConfig::validate`].
pub const MAX_HORIZON_DAYS: usize = 365;

/// Default number of days to extrapolate.
pub const DEFAULT_HORIZON_DAYS: usize = 30;

/// Default polynomial degree.
pub const DEFAULT_DEGREE: usize = 3;

/// Forecast parameters.
///
/// ```
/// use trendcast::forecast::ForecastConfig;
///
/// let config = ForecastConfig::new().horizon_days(90).degree(2);
/// assert!(config.validate().is_ok());
/// assert!(ForecastConfig::new().horizon_days(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForecastConfig {
    horizon_days: usize,
    degree: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            degree: DEFAULT_DEGREE,
        }
    }
}

impl ForecastConfig {
    /// Creates a configuration with the defaults (30 days, degree 3).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of calendar days to extrapolate.
    ///
    /// Default: 30
    #[must_use]
    pub const fn horizon_days(mut self, horizon_days: usize) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    /// Sets the polynomial degree.
    ///
    /// Default: 3
    #[must_use]
    pub const fn degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Returns the configured horizon.
    #[must_use]
    pub const fn get_horizon_days(&self) -> usize {
        self.horizon_days
    }

    /// Returns the configured degree.
    #[must_use]
    pub const fn get_degree(&self) -> usize {
        self.degree
    }

    /// Checks that the horizon lies in `1..=MAX_HORIZON_DAYS`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidHorizon` otherwise.
    pub const fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            return Err(Error::InvalidHorizon {
                horizon: self.horizon_days,
                reason: "horizon must be at least one day",
            });
        }
        if self.horizon_days > MAX_HORIZON_DAYS {
            return Err(Error::InvalidHorizon {
                horizon: self.horizon_days,
                reason: "horizon exceeds 365 days",
            });
        }
        Ok(())
    }
}

/// One extrapolated day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForecastPoint {
    /// Calendar day of the prediction.
    pub date: NaiveDate,
    /// Polynomial value on that day.
    pub predicted_close: f64,
}

/// A fitted polynomial trend.
///
/// Coefficients are stored in ascending powers of the rescaled abscissa
/// `u = (t - center) / scale`, where `t` is the day offset from `origin`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrendModel {
    coefficients: Vec<f64>,
    origin: NaiveDate,
    center: f64,
    scale: f64,
}

impl TrendModel {
    /// Polynomial degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Coefficients in ascending powers of the rescaled day offset.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Date of the first bar; day offset 0.
    #[must_use]
    pub const fn origin(&self) -> NaiveDate {
        self.origin
    }

    /// Evaluates the trend at `day_offset` days after [`origin`](Self::origin).
    #[must_use]
    pub fn predict(&self, day_offset: f64) -> f64 {
        let u = (day_offset - self.center) / self.scale;
        polyfit::horner(&self.coefficients, u)
    }

    /// Evaluates the trend on a calendar date.
    #[must_use]
    pub fn predict_date(&self, date: NaiveDate) -> f64 {
        self.predict(day_offset(self.origin, date))
    }
}

/// In-sample fit plus out-of-sample extrapolation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForecastResult {
    /// Fitted value for each historical bar, in series order.
    pub fitted: Vec<f64>,
    /// One point per future calendar day, ascending.
    pub future: Vec<ForecastPoint>,
    /// The fitted model.
    pub model: TrendModel,
}

/// Fits a polynomial of `degree` to the closes and extrapolates
/// `horizon_days` calendar days past the last bar.
///
/// # Errors
///
/// - invalid-input kind: the series fails validation, has fewer than
///   `degree + 1` bars (`InsufficientData`), `horizon_days == 0`
///   (`InvalidHorizon`), or a future date is not representable
///   (`DateOutOfRange`)
/// - numeric-degeneracy kind: the design is rank deficient
///   (`SingularDesign`) or a value is not finite (`NonFiniteResult`)
#[must_use = "this returns a Result with the forecast, which should be used"]
pub fn forecast(series: &[PriceBar], horizon_days: usize, degree: usize) -> Result<ForecastResult> {
    if horizon_days == 0 {
        return Err(Error::InvalidHorizon {
            horizon: horizon_days,
            reason: "horizon must be at least one day",
        });
    }
    fit_and_extend(series, horizon_days, degree)
}

/// Runs [`forecast`] with the parameters of `config`, after
/// [`ForecastConfig::validate`].
///
/// # Errors
///
/// As [`forecast`], plus `InvalidHorizon` above [`MAX_HORIZON_DAYS`].
#[must_use = "this returns a Result with the forecast, which should be used"]
pub fn forecast_with(series: &[PriceBar], config: &ForecastConfig) -> Result<ForecastResult> {
    config.validate()?;
    fit_and_extend(series, config.horizon_days, config.degree)
}

fn fit_and_extend(series: &[PriceBar], horizon_days: usize, degree: usize) -> Result<ForecastResult> {
    validate_series(series)?;
    let required = degree.saturating_add(1);
    if series.len() < required {
        return Err(Error::InsufficientData {
            required,
            actual: series.len(),
            operation: "forecast",
        });
    }

    let origin = series[0].timestamp;
    let last = series[series.len() - 1].timestamp;
    let span = day_offset(origin, last);
    let center = span / 2.0;
    let scale = if center > 0.0 { center } else { 1.0 };

    let u: Vec<f64> = series
        .iter()
        .map(|bar| (day_offset(origin, bar.timestamp) - center) / scale)
        .collect();
    let closes: Vec<f64> = series.iter().map(|bar| bar.close).collect();

    let coefficients = polyfit::polyfit(&u, &closes, degree)?;
    let model = TrendModel {
        coefficients,
        origin,
        center,
        scale,
    };

    let fitted: Vec<f64> = u
        .iter()
        .map(|&x| polyfit::horner(&model.coefficients, x))
        .collect();
    ensure_finite(&fitted, "fitted values")?;

    let future = (1..=horizon_days)
        .map(|k| {
            let date = u64::try_from(k)
                .ok()
                .and_then(|k| last.checked_add_days(Days::new(k)))
                .ok_or(Error::DateOutOfRange {
                    context: "forecast date past the last bar",
                })?;
            Ok(ForecastPoint {
                date,
                predicted_close: model.predict_date(date),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    if future.iter().any(|p| !p.predicted_close.is_finite()) {
        return Err(Error::NonFiniteResult {
            context: "extrapolated values",
        });
    }

    log::debug!(
        "fitted degree {degree} trend on {} bars, extrapolated {horizon_days} days to {}",
        series.len(),
        future.last().map_or(last, |p| p.date)
    );

    Ok(ForecastResult {
        fitted,
        future,
        model,
    })
}

fn ensure_finite(values: &[f64], context: &'static str) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(Error::NonFiniteResult { context })
    }
}

#[allow(clippy::cast_precision_loss)]
fn day_offset(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}
