//! Indicator engine: enriches a daily series with a fixed indicator set.
//!
//! [`compute_indicators`] validates the series, runs every kernel over the
//! relevant columns, and zips the results back onto the bars. The kernels
//! mark warm-up positions with NaN; the engine turns those into `None`, so no
//! NaN ever leaves this module.
//!
//! | field | definition | first defined bar |
//! |-------|------------|-------------------|
//! | `sma_20`, `sma_50`, `sma_200` | SMA of close | 19, 49, 199 |
//! | `ema_12`, `ema_26` | EMA of close, seeded at bar 0 | 0 |
//! | `rsi_14` | RSI with SMA smoothing | 14 |
//! | `macd`, `macd_signal`, `macd_histogram` | MACD (12, 26, 9) | 0 |
//! | `bollinger_*` | Bollinger (20, 2σ), sample σ | 19 |
//! | `atr_14` | SMA of True Range | 13 |
//! | `stoch_k`, `stoch_d` | Stochastic (14, 3) | 13, 15 |
//! | `williams_r` | Williams %R (14) | 13 |
//! | `cci_20` | CCI (20) of the typical price, 0 on a flat window | 19 |
//! | `obv` | On-Balance Volume from 0 | 0 |
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use trendcast::engine::compute_indicators;
//! use trendcast::PriceBar;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let series: Vec<PriceBar> = (0..60)
//!     .map(|i| {
//!         let day = start + chrono::Days::new(i);
//!         PriceBar::new(day, 100.0, 100.0, 100.0, 100.0, 1_000)
//!     })
//!     .collect();
//!
//! let bars = compute_indicators(&series).unwrap();
//! assert_eq!(bars.len(), 60);
//! assert_eq!(bars[18].sma_20, None);
//! assert_eq!(bars[59].sma_20, Some(100.0));
//! assert_eq!(bars[59].rsi_14, Some(100.0));
//! ```

use crate::error::Result;
use crate::indicators::{
    atr, bollinger, cci, ema, macd, obv, rsi, sma, stochastic, williams_r,
};
use crate::series::{validate_series, Columns, PriceBar};
use crate::utils::defined;

/// Short SMA window.
pub const SMA_SHORT_PERIOD: usize = 20;
/// Long SMA window.
pub const SMA_LONG_PERIOD: usize = 50;
/// Long-term trend SMA window.
pub const SMA_TREND_PERIOD: usize = 200;
/// Fast EMA span, also the MACD fast span.
pub const EMA_FAST_SPAN: usize = 12;
/// Slow EMA span, also the MACD slow span.
pub const EMA_SLOW_SPAN: usize = 26;
/// MACD signal span.
pub const MACD_SIGNAL_SPAN: usize = 9;
/// RSI window.
pub const RSI_PERIOD: usize = 14;
/// Bollinger window.
pub const BOLLINGER_PERIOD: usize = 20;
/// Bollinger band multiplier.
pub const BOLLINGER_STD_DEV: f64 = 2.0;
/// ATR window.
pub const ATR_PERIOD: usize = 14;
/// Stochastic %K window.
pub const STOCH_K_PERIOD: usize = 14;
/// Stochastic %D smoothing window.
pub const STOCH_D_PERIOD: usize = 3;
/// Williams %R window.
pub const WILLIAMS_R_PERIOD: usize = 14;
/// CCI window.
pub const CCI_PERIOD: usize = 20;

/// A source bar together with its derived indicators.
///
/// `None` marks a bar where the indicator's window has not filled yet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorBar {
    /// The unchanged input bar.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub bar: PriceBar,
    /// 20-bar simple moving average of close.
    pub sma_20: Option<f64>,
    /// 50-bar simple moving average of close.
    pub sma_50: Option<f64>,
    /// 200-bar simple moving average of close.
    pub sma_200: Option<f64>,
    /// 12-span exponential moving average of close.
    pub ema_12: Option<f64>,
    /// 26-span exponential moving average of close.
    pub ema_26: Option<f64>,
    /// 14-bar RSI.
    pub rsi_14: Option<f64>,
    /// MACD line.
    pub macd: Option<f64>,
    /// MACD signal line.
    pub macd_signal: Option<f64>,
    /// MACD line minus signal line.
    pub macd_histogram: Option<f64>,
    /// Bollinger middle band.
    pub bollinger_mid: Option<f64>,
    /// Bollinger upper band.
    pub bollinger_upper: Option<f64>,
    /// Bollinger lower band.
    pub bollinger_lower: Option<f64>,
    /// 14-bar Average True Range.
    pub atr_14: Option<f64>,
    /// Stochastic %K.
    pub stoch_k: Option<f64>,
    /// Stochastic %D.
    pub stoch_d: Option<f64>,
    /// Williams %R.
    pub williams_r: Option<f64>,
    /// 20-bar Commodity Channel Index.
    pub cci_20: Option<f64>,
    /// On-Balance Volume, zero at the first bar.
    pub obv: f64,
}

impl IndicatorBar {
    /// Trading day of the underlying bar.
    #[must_use]
    pub const fn timestamp(&self) -> chrono::NaiveDate {
        self.bar.timestamp
    }
}

/// Computes every indicator for a validated series.
///
/// The output has one entry per input bar, in input order.
///
/// # Errors
///
/// Returns an invalid-input error if the series is empty, not strictly
/// ascending, holds a non-positive or non-finite price, or has a bar with
/// `high < low`. Nothing is computed in that case.
#[must_use = "this returns a Result with the enriched series, which should be used"]
pub fn compute_indicators(series: &[PriceBar]) -> Result<Vec<IndicatorBar>> {
    validate_series(series)?;

    let Columns {
        high,
        low,
        close,
        volume,
    } = Columns::from_bars(series);

    let sma_short = sma(&close, SMA_SHORT_PERIOD)?;
    let sma_long = sma(&close, SMA_LONG_PERIOD)?;
    let sma_trend = sma(&close, SMA_TREND_PERIOD)?;
    let ema_fast = ema(&close, EMA_FAST_SPAN)?;
    let ema_slow = ema(&close, EMA_SLOW_SPAN)?;
    let rsi_values = rsi(&close, RSI_PERIOD)?;
    let macd_out = macd(&close, EMA_FAST_SPAN, EMA_SLOW_SPAN, MACD_SIGNAL_SPAN)?;
    let bands = bollinger(&close, BOLLINGER_PERIOD, BOLLINGER_STD_DEV)?;
    let atr_values = atr(&high, &low, &close, ATR_PERIOD)?;
    let stoch = stochastic(&high, &low, &close, STOCH_K_PERIOD, STOCH_D_PERIOD)?;
    let williams = williams_r(&high, &low, &close, WILLIAMS_R_PERIOD)?;
    let cci_values = cci(&high, &low, &close, CCI_PERIOD)?;
    let obv_values = obv(&close, &volume)?;

    let bars: Vec<IndicatorBar> = series
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorBar {
            bar: *bar,
            sma_20: defined(sma_short[i]),
            sma_50: defined(sma_long[i]),
            sma_200: defined(sma_trend[i]),
            ema_12: defined(ema_fast[i]),
            ema_26: defined(ema_slow[i]),
            rsi_14: defined(rsi_values[i]),
            macd: defined(macd_out.macd_line[i]),
            macd_signal: defined(macd_out.signal_line[i]),
            macd_histogram: defined(macd_out.histogram[i]),
            bollinger_mid: defined(bands.middle[i]),
            bollinger_upper: defined(bands.upper[i]),
            bollinger_lower: defined(bands.lower[i]),
            atr_14: defined(atr_values[i]),
            stoch_k: defined(stoch.k[i]),
            stoch_d: defined(stoch.d[i]),
            williams_r: defined(williams[i]),
            cci_20: defined(cci_values[i]),
            obv: obv_values[i],
        })
        .collect();

    log::debug!(
        "computed indicators for {} bars ({} to {})",
        bars.len(),
        series[0].timestamp,
        series[series.len() - 1].timestamp
    );

    Ok(bars)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::error::Error;
    use chrono::{Days, NaiveDate};

    fn series_from_closes(closes: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                PriceBar::new(
                    start + Days::new(i as u64),
                    c,
                    c + 1.0,
                    c - 1.0,
                    c,
                    1_000 + i as u64,
                )
            })
            .collect()
    }

    #[test]
    fn test_single_bar() {
        let bars = compute_indicators(&series_from_closes(&[50.0])).unwrap();
        assert_eq!(bars.len(), 1);
        let b = &bars[0];
        assert_eq!(b.sma_20, None);
        assert_eq!(b.rsi_14, None);
        assert_eq!(b.ema_12, Some(50.0));
        assert_eq!(b.macd, Some(0.0));
        assert_eq!(b.atr_14, None);
        assert_eq!(b.obv, 0.0);
    }

    #[test]
    fn test_warmup_boundaries() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i % 7) as f64).collect();
        let bars = compute_indicators(&series_from_closes(&closes)).unwrap();
        let first = |f: fn(&IndicatorBar) -> Option<f64>| bars.iter().position(|b| f(b).is_some());
        assert_eq!(first(|b| b.sma_20), Some(19));
        assert_eq!(first(|b| b.sma_50), Some(49));
        assert_eq!(first(|b| b.ema_26), Some(0));
        assert_eq!(first(|b| b.rsi_14), Some(14));
        assert_eq!(first(|b| b.macd_signal), Some(0));
        assert_eq!(first(|b| b.bollinger_upper), Some(19));
        assert_eq!(first(|b| b.atr_14), Some(13));
        assert_eq!(first(|b| b.stoch_k), Some(13));
        assert_eq!(first(|b| b.stoch_d), Some(15));
        assert_eq!(first(|b| b.williams_r), Some(13));
        assert_eq!(first(|b| b.cci_20), Some(19));
        assert_eq!(first(|b| b.sma_200), None);
        // once defined, stays defined
        assert!(bars[19..].iter().all(|b| b.sma_20.is_some()));
        assert!(bars[14..].iter().all(|b| b.rsi_14.is_some()));
    }

    #[test]
    fn test_long_trend_and_cci() {
        let closes: Vec<f64> = (0..220).map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0).collect();
        let bars = compute_indicators(&series_from_closes(&closes)).unwrap();
        assert_eq!(bars[198].sma_200, None);
        let expected = closes[20..220].iter().sum::<f64>() / 200.0;
        assert!((bars[219].sma_200.unwrap() - expected).abs() < 1e-9);
        assert!(bars[19..].iter().all(|b| b.cci_20.unwrap().is_finite()));
    }

    #[test]
    fn test_bars_are_preserved() {
        let series = series_from_closes(&[10.0, 11.0, 12.0]);
        let bars = compute_indicators(&series).unwrap();
        for (out, src) in bars.iter().zip(&series) {
            assert_eq!(out.bar, *src);
            assert_eq!(out.timestamp(), src.timestamp);
        }
    }

    #[test]
    fn test_invalid_series_rejected() {
        assert!(matches!(compute_indicators(&[]), Err(Error::EmptyInput)));

        let mut series = series_from_closes(&[10.0, 11.0, 12.0]);
        series.swap(0, 2);
        assert!(matches!(
            compute_indicators(&series),
            Err(Error::UnsortedSeries { index: 1 })
        ));

        let mut series = series_from_closes(&[10.0, 11.0, 12.0]);
        series[1].close = 0.0;
        assert!(compute_indicators(&series).unwrap_err().is_invalid_input());

        let mut series = series_from_closes(&[10.0, 11.0, 12.0]);
        series[2].high = 5.0;
        assert!(compute_indicators(&series).unwrap_err().is_invalid_input());
    }
}
