//! Batch processing over many independent series.
//!
//! Each series (one per instrument, say) is processed on its own. With the
//! `parallel` feature the work is spread over Rayon's thread pool once the
//! batch reaches a configurable size; below that, or without the feature, it
//! runs sequentially.
//!
//! ```toml
//! [dependencies]
//! trendcast = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::{Days, NaiveDate};
//! use trendcast::batch::BatchProcessor;
//! use trendcast::PriceBar;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let make = |level: f64| -> Vec<PriceBar> {
//!     (0..25)
//!         .map(|i| PriceBar::new(start + Days::new(i), level, level, level, level, 1))
//!         .collect()
//! };
//! let universe = vec![make(10.0), make(20.0), Vec::new()];
//!
//! let results = BatchProcessor::new().analyze_batch(&universe, None);
//! assert!(results[0].is_ok());
//! assert!(results[1].is_ok());
//! assert!(results[2].is_err());
//! ```

use crate::analysis::{analyze, Analysis};
use crate::error::Result;
use crate::forecast::ForecastConfig;
use crate::series::PriceBar;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs one function per input, sequentially or in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProcessor {
    /// Minimum batch size that switches to parallel processing.
    min_parallel_threshold: usize,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProcessor {
    /// Creates a processor with the default threshold of 8 series.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_parallel_threshold: 8,
        }
    }

    /// Sets the minimum number of series required for parallel processing.
    #[must_use]
    pub const fn min_parallel_threshold(mut self, threshold: usize) -> Self {
        self.min_parallel_threshold = threshold;
        self
    }

    /// Returns the configured threshold.
    #[must_use]
    pub const fn threshold(&self) -> usize {
        self.min_parallel_threshold
    }

    /// Applies `f` to every series and stops at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    #[cfg(feature = "parallel")]
    pub fn process<S, F, R>(&self, series: &[S], f: F) -> Result<Vec<R>>
    where
        S: AsRef<[PriceBar]> + Sync,
        F: Fn(&[PriceBar]) -> Result<R> + Send + Sync,
        R: Send,
    {
        if series.len() < self.min_parallel_threshold {
            series.iter().map(|s| f(s.as_ref())).collect()
        } else {
            series.par_iter().map(|s| f(s.as_ref())).collect()
        }
    }

    /// Applies `f` to every series and stops at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    #[cfg(not(feature = "parallel"))]
    pub fn process<S, F, R>(&self, series: &[S], f: F) -> Result<Vec<R>>
    where
        S: AsRef<[PriceBar]>,
        F: Fn(&[PriceBar]) -> Result<R>,
    {
        series.iter().map(|s| f(s.as_ref())).collect()
    }

    /// Applies `f` to every series and keeps every outcome, in input order.
    #[cfg(feature = "parallel")]
    pub fn process_each<S, F, R>(&self, series: &[S], f: F) -> Vec<Result<R>>
    where
        S: AsRef<[PriceBar]> + Sync,
        F: Fn(&[PriceBar]) -> Result<R> + Send + Sync,
        R: Send,
    {
        if series.len() < self.min_parallel_threshold {
            series.iter().map(|s| f(s.as_ref())).collect()
        } else {
            series.par_iter().map(|s| f(s.as_ref())).collect()
        }
    }

    /// Applies `f` to every series and keeps every outcome, in input order.
    #[cfg(not(feature = "parallel"))]
    pub fn process_each<S, F, R>(&self, series: &[S], f: F) -> Vec<Result<R>>
    where
        S: AsRef<[PriceBar]>,
        F: Fn(&[PriceBar]) -> Result<R>,
    {
        series.iter().map(|s| f(s.as_ref())).collect()
    }

    /// Runs [`analyze`] on every series, keeping each outcome.
    #[cfg(feature = "parallel")]
    pub fn analyze_batch<S>(
        &self,
        series: &[S],
        forecast: Option<&ForecastConfig>,
    ) -> Vec<Result<Analysis>>
    where
        S: AsRef<[PriceBar]> + Sync,
    {
        self.process_each(series, |s| analyze(s, forecast))
    }

    /// Runs [`analyze`] on every series, keeping each outcome.
    #[cfg(not(feature = "parallel"))]
    pub fn analyze_batch<S>(
        &self,
        series: &[S],
        forecast: Option<&ForecastConfig>,
    ) -> Vec<Result<Analysis>>
    where
        S: AsRef<[PriceBar]>,
    {
        self.process_each(series, |s| analyze(s, forecast))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::engine::compute_indicators;
    use crate::error::Error;
    use chrono::{Days, NaiveDate};

    fn flat(n: u64, level: f64) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        (0..n)
            .map(|i| PriceBar::new(start + Days::new(i), level, level, level, level, 5))
            .collect()
    }

    #[test]
    fn test_process_preserves_order() {
        let universe: Vec<Vec<PriceBar>> = (1..=20).map(|k| flat(k, k as f64)).collect();
        let lengths = BatchProcessor::new()
            .min_parallel_threshold(4)
            .process(&universe, |s| Ok(s.len()))
            .unwrap();
        assert_eq!(lengths, (1..=20).collect::<Vec<usize>>());
    }

    #[test]
    fn test_process_fails_fast() {
        let universe = vec![flat(5, 1.0), Vec::new(), flat(5, 2.0)];
        let result = BatchProcessor::new().process(&universe, compute_indicators);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_process_each_keeps_good_results() {
        let universe = vec![flat(5, 1.0), Vec::new(), flat(5, 2.0)];
        let results = BatchProcessor::new().process_each(&universe, compute_indicators);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap()[4].sma_20, None);
    }

    #[test]
    fn test_analyze_batch_with_forecast() {
        let universe = vec![flat(40, 10.0), flat(2, 10.0)];
        let config = ForecastConfig::new().horizon_days(7).degree(2);
        let results = BatchProcessor::new()
            .min_parallel_threshold(1)
            .analyze_batch(&universe, Some(&config));
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.forecast.as_ref().unwrap().future.len(), 7);
        assert!(results[1].as_ref().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_default_threshold() {
        assert_eq!(BatchProcessor::default().threshold(), 8);
    }
}
