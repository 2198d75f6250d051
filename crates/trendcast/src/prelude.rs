//! Commonly used types and functions for convenient importing.
//!
//! ```
//! use trendcast::prelude::*;
//!
//! let prices = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//!
//! let sma_result = sma(&prices, 3).unwrap();
//! let ema_result = ema(&prices, 3).unwrap();
//! let rsi_result = rsi(&prices, 5).unwrap();
//! assert_eq!(sma_result.len(), ema_result.len());
//! assert_eq!(rsi_result.len(), prices.len());
//! ```

// Error types
pub use crate::error::{Error, ErrorKind, Result};

// Traits
pub use crate::traits::SeriesElement;

// Data model and pipeline
pub use crate::analysis::{analyze, Analysis};
pub use crate::batch::BatchProcessor;
pub use crate::engine::{compute_indicators, IndicatorBar};
pub use crate::forecast::{
    forecast, forecast_with, ForecastConfig, ForecastPoint, ForecastResult, TrendModel,
};
pub use crate::series::{validate_series, PriceBar};

// Indicator kernels
pub use crate::indicators::{
    atr, bollinger, cci, ema, ema_with_alpha, macd, obv, rsi, sma, stochastic, true_range, williams_r,
};

// Output types
pub use crate::indicators::{BollingerOutput, MacdOutput, StochasticOutput};
