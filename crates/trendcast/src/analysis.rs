//! End-to-end pipeline: indicators, then an optional trend forecast.

use crate::engine::{compute_indicators, IndicatorBar};
use crate::error::Result;
use crate::forecast::{forecast_with, ForecastConfig, ForecastResult};
use crate::series::PriceBar;

/// Enriched series plus the forecast, if one was requested.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    /// One entry per input bar.
    pub bars: Vec<IndicatorBar>,
    /// Present when a [`ForecastConfig`] was supplied.
    pub forecast: Option<ForecastResult>,
}

/// Runs the indicator engine and, when `forecast` is `Some`, the forecaster
/// on the same series.
///
/// Either stage failing fails the whole call; there is no partial result.
///
/// # Errors
///
/// Any error of [`compute_indicators`] or [`forecast_with`].
///
/// # Example
///
/// ```
/// use chrono::{Days, NaiveDate};
/// use trendcast::{analyze, ForecastConfig, PriceBar};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let series: Vec<PriceBar> = (0..30)
///     .map(|i| {
///         let c = 100.0 + i as f64;
///         PriceBar::new(start + Days::new(i), c, c + 1.0, c - 1.0, c, 500)
///     })
///     .collect();
///
/// let analysis = analyze(&series, Some(&ForecastConfig::new().degree(1))).unwrap();
/// assert_eq!(analysis.bars.len(), 30);
/// assert_eq!(analysis.forecast.unwrap().future.len(), 30);
/// ```
#[must_use = "this returns a Result with the analysis, which should be used"]
pub fn analyze(series: &[PriceBar], forecast: Option<&ForecastConfig>) -> Result<Analysis> {
    let bars = compute_indicators(series)?;
    let forecast = forecast
        .map(|config| forecast_with(series, config))
        .transpose()?;
    Ok(Analysis { bars, forecast })
}
