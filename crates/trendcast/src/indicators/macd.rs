//! Moving Average Convergence Divergence (MACD) indicator.
//!
//! MACD is the gap between a fast and a slow EMA of the close, together with
//! an EMA of that gap (the signal line) and their difference (the histogram).
//! All EMAs here are seeded at the first observation (see
//! [`ema`](crate::indicators::ema::ema)), so every component is defined from
//! index 0.
//!
//! ```text
//! macd[i]      = EMA(close, fast)[i] - EMA(close, slow)[i]
//! signal[i]    = EMA(macd, signal)[i]
//! histogram[i] = macd[i] - signal[i]
//! ```
//!
//! # Example
//!
//! ```
//! use trendcast::indicators::macd::macd;
//!
//! let data: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64) * 0.5).collect();
//! let out = macd(&data, 12, 26, 9).unwrap();
//!
//! assert_eq!(out.len(), 50);
//! assert_eq!(out.macd_line[0], 0.0);
//! // a steady uptrend keeps the fast EMA above the slow one
//! assert!(out.macd_line[49] > 0.0);
//! ```

use crate::error::{Error, Result};
use crate::indicators::ema::ema;
use crate::traits::{validate_period, SeriesElement};

/// The three MACD components, each as long as the input.
#[derive(Debug, Clone)]
pub struct MacdOutput<T: SeriesElement> {
    /// Fast EMA minus slow EMA.
    pub macd_line: Vec<T>,
    /// EMA of the MACD line.
    pub signal_line: Vec<T>,
    /// MACD line minus signal line.
    pub histogram: Vec<T>,
}

impl<T: SeriesElement> MacdOutput<T> {
    /// Returns the length of the output vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.macd_line.len()
    }

    /// Returns true if the output vectors are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macd_line.is_empty()
    }
}

/// Computes MACD with the given fast, slow and signal spans.
///
/// # Errors
///
/// - `Error::EmptyInput` if the input is empty
/// - `Error::InvalidPeriod` if any span is zero, or `fast_span >= slow_span`
#[must_use = "this returns a Result with the MACD output, which should be used"]
pub fn macd<T: SeriesElement>(
    data: &[T],
    fast_span: usize,
    slow_span: usize,
    signal_span: usize,
) -> Result<MacdOutput<T>> {
    validate_macd_spans(fast_span, slow_span, signal_span)?;

    let fast = ema(data, fast_span)?;
    let slow = ema(data, slow_span)?;
    let macd_line: Vec<T> = fast.iter().zip(&slow).map(|(&f, &s)| f - s).collect();
    let signal_line = ema(&macd_line, signal_span)?;
    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(&m, &s)| m - s)
        .collect();

    Ok(MacdOutput {
        macd_line,
        signal_line,
        histogram,
    })
}

fn validate_macd_spans(fast_span: usize, slow_span: usize, signal_span: usize) -> Result<()> {
    validate_period(fast_span)?;
    validate_period(slow_span)?;
    validate_period(signal_span)?;
    if fast_span >= slow_span {
        return Err(Error::InvalidPeriod {
            period: fast_span,
            reason: "fast span must be less than slow span",
        });
    }
    Ok(())
}
