//! Shared test utilities for trendcast integration tests.

use chrono::{Days, NaiveDate};
use trendcast::PriceBar;

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for comparisons involving accumulated floating-point operations.
#[allow(dead_code)]
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Approximate equality check; two NaN values compare equal.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Builds a calendar date, panicking on an impossible one.
#[allow(dead_code)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Consecutive daily bars starting at `start`, one per close.
///
/// High and low sit one unit around the close; volume grows with the index.
#[allow(dead_code)]
pub fn daily_series(start: NaiveDate, closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            PriceBar::new(
                start + Days::new(i as u64),
                close,
                close + 1.0,
                close - 1.0,
                close,
                1_000 + 10 * i as u64,
            )
        })
        .collect()
}

/// Deterministic noisy series around 100 (linear congruential noise).
#[allow(dead_code)]
pub fn noisy_closes(len: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..len)
        .map(|i| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            100.0 + (i as f64 * 0.05) + (unit - 0.5) * 8.0
        })
        .collect()
}

/// Population variance of the defined values.
#[allow(dead_code)]
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}
