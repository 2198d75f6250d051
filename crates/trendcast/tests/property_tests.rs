//! Property-based tests for the engine, the kernels and the forecaster.
//!
//! These tests check invariants that must hold for every valid input, using
//! randomly generated series to find edge cases.

#![allow(clippy::cast_precision_loss)]

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use trendcast::indicators::{bollinger, obv, rsi, sma};
use trendcast::kernels::rolling_extrema::{rolling_max, rolling_min};
use trendcast::{compute_indicators, forecast, PriceBar};

// ==================== Test Data Generators ====================

/// Random positive price series.
fn arb_price_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, min_len..=max_len)
}

/// Random valid bar series: positive prices, `high >= low`, calendar gaps of
/// one to four days between bars.
fn arb_bar_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<PriceBar>> {
    prop::collection::vec(
        (1.0..1000.0_f64, 0.0..0.1_f64, 0.0..0.1_f64, 1u64..=4, 0u64..1_000_000),
        min_len..=max_len,
    )
    .prop_map(|rows| {
        let mut day = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap();
        rows.into_iter()
            .map(|(base, up, down, gap, volume)| {
                day = day + Days::new(gap);
                let high = base * (1.0 + up);
                let low = base * (1.0 - down);
                PriceBar::new(day, base, high, low, base, volume)
            })
            .collect()
    })
}

// ==================== Engine Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Output is as long as the input, in the same order, with the same bars.
    #[test]
    fn prop_engine_preserves_series(series in arb_bar_series(1, 120)) {
        let bars = compute_indicators(&series).unwrap();
        prop_assert_eq!(bars.len(), series.len());
        for (out, src) in bars.iter().zip(&series) {
            prop_assert_eq!(out.bar, *src);
        }
    }

    /// RSI stays inside [0, 100].
    #[test]
    fn prop_engine_rsi_bounded(series in arb_bar_series(15, 120)) {
        let bars = compute_indicators(&series).unwrap();
        for rsi in bars.iter().filter_map(|b| b.rsi_14) {
            prop_assert!((0.0..=100.0).contains(&rsi), "rsi {}", rsi);
        }
    }

    /// Bollinger bands are ordered wherever defined.
    #[test]
    fn prop_engine_bollinger_ordered(series in arb_bar_series(20, 120)) {
        let bars = compute_indicators(&series).unwrap();
        for b in &bars {
            if let (Some(u), Some(m), Some(l)) = (b.bollinger_upper, b.bollinger_mid, b.bollinger_lower) {
                prop_assert!(u >= m && m >= l);
            }
        }
    }

    /// OBV moves in the direction of the close.
    #[test]
    fn prop_engine_obv_follows_close(series in arb_bar_series(2, 120)) {
        let bars = compute_indicators(&series).unwrap();
        prop_assert_eq!(bars[0].obv, 0.0);
        for pair in bars.windows(2) {
            let d_close = pair[1].bar.close - pair[0].bar.close;
            let d_obv = pair[1].obv - pair[0].obv;
            if d_close > 0.0 {
                prop_assert!(d_obv >= 0.0);
                prop_assert_eq!(d_obv, pair[1].bar.volume as f64);
            } else if d_close < 0.0 {
                prop_assert!(d_obv <= 0.0);
            } else {
                prop_assert_eq!(d_obv, 0.0);
            }
        }
    }

    /// Stochastic %K and Williams %R stay on their scales.
    #[test]
    fn prop_engine_oscillators_bounded(series in arb_bar_series(14, 120)) {
        let bars = compute_indicators(&series).unwrap();
        for b in &bars {
            if let Some(k) = b.stoch_k {
                prop_assert!((-1e-9..=100.0 + 1e-9).contains(&k));
            }
            if let Some(w) = b.williams_r {
                prop_assert!((-100.0 - 1e-9..=1e-9).contains(&w));
            }
        }
    }
}

// ==================== Kernel Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// SMA lies between the window extrema.
    #[test]
    fn prop_sma_within_window_range(data in arb_price_series(1, 100), period in 1usize..=20) {
        let avg = sma(&data, period).unwrap();
        let hi = rolling_max(&data, period).unwrap();
        let lo = rolling_min(&data, period).unwrap();
        for i in 0..data.len() {
            if !avg[i].is_nan() {
                prop_assert!(avg[i] <= hi[i] + 1e-9);
                prop_assert!(avg[i] >= lo[i] - 1e-9);
            }
        }
    }

    /// Kernel RSI is bounded for any period.
    #[test]
    fn prop_rsi_bounded(data in arb_price_series(1, 100), period in 1usize..=30) {
        let result = rsi(&data, period).unwrap();
        prop_assert_eq!(result.len(), data.len());
        for v in result.iter().filter(|v| !v.is_nan()) {
            prop_assert!((0.0..=100.0).contains(v));
        }
    }

    /// Band width grows with the multiplier.
    #[test]
    fn prop_bollinger_width_monotone(data in arb_price_series(2, 80), period in 2usize..=20) {
        let narrow = bollinger(&data, period, 1.0).unwrap();
        let wide = bollinger(&data, period, 2.0).unwrap();
        for i in 0..data.len() {
            if !narrow.upper[i].is_nan() {
                prop_assert!(wide.upper[i] >= narrow.upper[i]);
                prop_assert!(wide.lower[i] <= narrow.lower[i]);
            }
        }
    }

    /// OBV of a strictly rising series is the running sum of later volumes.
    #[test]
    fn prop_obv_rising(volumes in prop::collection::vec(0.0..1e6_f64, 1..60)) {
        let close: Vec<f64> = (0..volumes.len()).map(|i| 10.0 + i as f64).collect();
        let result = obv(&close, &volumes).unwrap();
        let mut expected = 0.0;
        for i in 1..volumes.len() {
            expected += volumes[i];
            prop_assert!((result[i] - expected).abs() < 1e-6);
        }
    }
}

// ==================== Forecast Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Future dates are consecutive calendar days after the last bar.
    #[test]
    fn prop_forecast_dates_consecutive(series in arb_bar_series(4, 80), horizon in 1usize..=60) {
        let result = forecast(&series, horizon, 1).unwrap();
        prop_assert_eq!(result.future.len(), horizon);
        prop_assert_eq!(result.fitted.len(), series.len());
        let mut expected = series[series.len() - 1].timestamp;
        for point in &result.future {
            expected = expected + Days::new(1);
            prop_assert_eq!(point.date, expected);
            prop_assert!(point.predicted_close.is_finite());
        }
    }

    /// A degree-0 fit is the mean close.
    #[test]
    fn prop_forecast_degree_zero_is_mean(series in arb_bar_series(1, 60)) {
        let result = forecast(&series, 3, 0).unwrap();
        let mean = series.iter().map(|b| b.close).sum::<f64>() / series.len() as f64;
        for f in &result.fitted {
            prop_assert!((f - mean).abs() < 1e-6 * mean.max(1.0));
        }
    }
}
