//! End-to-end tests of the analysis pipeline.

#![allow(clippy::cast_precision_loss)]

mod common;

use common::{approx_eq, daily_series, date, noisy_closes, variance, EPSILON};
use trendcast::indicators::{ema, rsi, sma};
use trendcast::{analyze, compute_indicators, BatchProcessor, ForecastConfig};

#[test]
fn short_sma_is_noisier_than_long_sma() {
    let closes = noisy_closes(400, 42);
    let bars = compute_indicators(&daily_series(date(2020, 1, 1), &closes)).unwrap();
    // compare over the range where both are defined
    let short: Vec<f64> = bars[49..].iter().filter_map(|b| b.sma_20).collect();
    let long: Vec<f64> = bars[49..].iter().filter_map(|b| b.sma_50).collect();
    assert_eq!(short.len(), long.len());
    let short_diff: Vec<f64> = short.windows(2).map(|w| w[1] - w[0]).collect();
    let long_diff: Vec<f64> = long.windows(2).map(|w| w[1] - w[0]).collect();
    assert!(variance(&short_diff) > variance(&long_diff));
}

#[test]
fn engine_matches_kernels() {
    let closes = noisy_closes(90, 5);
    let bars = compute_indicators(&daily_series(date(2019, 7, 1), &closes)).unwrap();
    let sma_20 = sma(&closes, 20).unwrap();
    let ema_12 = ema(&closes, 12).unwrap();
    let rsi_14 = rsi(&closes, 14).unwrap();
    for (i, bar) in bars.iter().enumerate() {
        assert_eq!(bar.sma_20.is_some(), !sma_20[i].is_nan());
        if let Some(v) = bar.sma_20 {
            assert!(approx_eq(v, sma_20[i], EPSILON));
        }
        assert!(approx_eq(bar.ema_12.unwrap(), ema_12[i], EPSILON));
        if let Some(v) = bar.rsi_14 {
            assert!(approx_eq(v, rsi_14[i], EPSILON));
        }
    }
}

#[test]
fn macd_fields_consistent() {
    let closes = noisy_closes(120, 9);
    let bars = compute_indicators(&daily_series(date(2018, 1, 1), &closes)).unwrap();
    for bar in &bars {
        let macd = bar.macd.unwrap();
        assert!(approx_eq(macd, bar.ema_12.unwrap() - bar.ema_26.unwrap(), EPSILON));
        assert!(approx_eq(
            bar.macd_histogram.unwrap(),
            macd - bar.macd_signal.unwrap(),
            EPSILON
        ));
    }
}

#[test]
fn analyze_bundles_both_stages() {
    let series = daily_series(date(2023, 9, 1), &noisy_closes(120, 1));
    let config = ForecastConfig::new().horizon_days(21).degree(2);
    let analysis = analyze(&series, Some(&config)).unwrap();

    assert_eq!(analysis.bars.len(), 120);
    let fc = analysis.forecast.unwrap();
    assert_eq!(fc.fitted.len(), 120);
    assert_eq!(fc.future.len(), 21);
    assert!(fc.future[0].date > series[119].timestamp);
}

#[test]
fn batch_matches_individual_runs() {
    let universe: Vec<_> = (0..12)
        .map(|seed| daily_series(date(2022, 1, 3), &noisy_closes(80, seed)))
        .collect();
    let config = ForecastConfig::new();
    let batch = BatchProcessor::new()
        .min_parallel_threshold(2)
        .analyze_batch(&universe, Some(&config));
    for (series, result) in universe.iter().zip(batch) {
        assert_eq!(result.unwrap(), analyze(series, Some(&config)).unwrap());
    }
}
