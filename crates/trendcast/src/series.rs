//! Daily OHLCV observations and series validation.
//!
//! A series is a plain `&[PriceBar]`. Every entry point of the engine and the
//! forecaster calls [`validate_series`] first, so a malformed series is
//! rejected before any computation and nothing partial is returned.

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// One daily observation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceBar {
    /// Trading day.
    pub timestamp: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Highest traded price.
    pub high: f64,
    /// Lowest traded price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: u64,
}

impl PriceBar {
    /// Creates a bar from its fields.
    #[must_use]
    pub const fn new(
        timestamp: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Checks the invariants every series must satisfy.
///
/// - at least one bar
/// - timestamps strictly ascending (sorted, no duplicates)
/// - every price positive and finite
/// - `high >= low` on every bar
///
/// # Errors
///
/// Returns the first violation found: `EmptyInput`, `UnsortedSeries`,
/// `InvalidPrice` or `InvertedRange`.
pub fn validate_series(series: &[PriceBar]) -> Result<()> {
    if series.is_empty() {
        return Err(Error::EmptyInput);
    }

    for (index, bar) in series.iter().enumerate() {
        if index > 0 && bar.timestamp <= series[index - 1].timestamp {
            return Err(Error::UnsortedSeries { index });
        }

        for (field, value) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ] {
            // `!(value > 0.0)` also rejects NaN
            if !(value > 0.0) || !value.is_finite() {
                return Err(Error::InvalidPrice {
                    index,
                    field,
                    value,
                });
            }
        }

        if bar.high < bar.low {
            return Err(Error::InvertedRange {
                index,
                high: bar.high,
                low: bar.low,
            });
        }
    }

    Ok(())
}

/// Column-oriented copy of the fields the kernels consume.
#[derive(Debug, Clone, Default)]
pub(crate) struct Columns {
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

impl Columns {
    pub(crate) fn from_bars(series: &[PriceBar]) -> Self {
        let n = series.len();
        let mut columns = Self {
            high: Vec::with_capacity(n),
            low: Vec::with_capacity(n),
            close: Vec::with_capacity(n),
            volume: Vec::with_capacity(n),
        };
        for bar in series {
            columns.high.push(bar.high);
            columns.low.push(bar.low);
            columns.close.push(bar.close);
            #[allow(clippy::cast_precision_loss)]
            columns.volume.push(bar.volume as f64);
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn bar(d: u32, close: f64) -> PriceBar {
        PriceBar::new(day(d), close, close + 1.0, close - 1.0, close, 1_000)
    }

    #[test]
    fn test_valid_series() {
        let series = vec![bar(1, 10.0), bar(2, 11.0), bar(5, 12.0)];
        assert!(validate_series(&series).is_ok());
    }

    #[test]
    fn test_empty_series() {
        assert!(matches!(validate_series(&[]), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_unsorted_series() {
        let series = vec![bar(2, 10.0), bar(1, 11.0)];
        assert!(matches!(
            validate_series(&series),
            Err(Error::UnsortedSeries { index: 1 })
        ));
    }

    #[test]
    fn test_duplicate_timestamp() {
        let series = vec![bar(1, 10.0), bar(2, 11.0), bar(2, 12.0)];
        assert!(matches!(
            validate_series(&series),
            Err(Error::UnsortedSeries { index: 2 })
        ));
    }

    #[test]
    fn test_non_positive_price() {
        let mut series = vec![bar(1, 10.0), bar(2, 11.0)];
        series[1].open = 0.0;
        assert!(matches!(
            validate_series(&series),
            Err(Error::InvalidPrice {
                index: 1,
                field: "open",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_price() {
        let mut series = vec![bar(1, 10.0)];
        series[0].close = f64::NAN;
        assert!(matches!(
            validate_series(&series),
            Err(Error::InvalidPrice { field: "close", .. })
        ));
    }

    #[test]
    fn test_infinite_price() {
        let mut series = vec![bar(1, 10.0)];
        series[0].high = f64::INFINITY;
        assert!(matches!(
            validate_series(&series),
            Err(Error::InvalidPrice { field: "high", .. })
        ));
    }

    #[test]
    fn test_inverted_range() {
        let mut series = vec![bar(1, 10.0)];
        series[0].high = 8.0;
        series[0].low = 9.0;
        assert!(matches!(
            validate_series(&series),
            Err(Error::InvertedRange { index: 0, .. })
        ));
    }

    #[test]
    fn test_columns_from_bars() {
        let series = vec![bar(1, 10.0), bar(2, 11.0)];
        let columns = Columns::from_bars(&series);
        assert_eq!(columns.close, vec![10.0, 11.0]);
        assert_eq!(columns.high, vec![11.0, 12.0]);
        assert_eq!(columns.low, vec![9.0, 10.0]);
        assert_eq!(columns.volume, vec![1000.0, 1000.0]);
    }
}
