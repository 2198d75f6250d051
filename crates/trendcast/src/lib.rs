//! trendcast: technical indicators and polynomial trend forecasting for daily
//! OHLCV series.
//!
//! The crate turns an ordered series of daily bars into
//!
//! - an enriched series with a fixed indicator set (SMA, EMA, RSI, MACD,
//!   Bollinger Bands, ATR, OBV, Stochastic, Williams %R), see [`engine`];
//! - a polynomial trend fitted to the closes and extrapolated over the next
//!   calendar days, see [`forecast`].
//!
//! Everything is a pure function of its input. Nothing is cached between calls
//! and there is no global state, so independent series can be processed
//! concurrently (see [`batch`]).
//!
//! # Quick Start
//!
//! ```
//! use chrono::{Days, NaiveDate};
//! use trendcast::prelude::*;
//!
//! let start = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
//! let series: Vec<PriceBar> = (0..31)
//!     .map(|i| {
//!         let close = 100.0 + (i as f64 * 0.4).sin();
//!         PriceBar::new(start + Days::new(i), close, close + 1.0, close - 1.0, close, 10_000)
//!     })
//!     .collect();
//!
//! let analysis = analyze(&series, Some(&ForecastConfig::new())).unwrap();
//! let forecast = analysis.forecast.unwrap();
//! assert_eq!(forecast.future[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
//! assert_eq!(forecast.future.len(), 30);
//! ```
//!
//! # Indicator kernels
//!
//! The building blocks are generic slice kernels in [`indicators`], usable on
//! their own with `f32` or `f64`:
//!
//! ```
//! use trendcast::indicators::sma;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = sma(&data, 3).unwrap();
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10);
//! ```
//!
//! # Error Handling
//!
//! Every fallible function returns [`Result<T, Error>`]. [`Error::kind`]
//! separates malformed input from numerically degenerate computations:
//!
//! ```
//! use trendcast::{compute_indicators, ErrorKind};
//!
//! let err = compute_indicators(&[]).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidInput);
//! ```
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade (`debug` per run, `trace` for
//! solver details) and never installs a logger itself.
//!
//! # Features
//!
//! - `parallel`: Rayon-backed [`BatchProcessor`]
//! - `serde`: `Serialize`/`Deserialize` for the data model and results

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod batch;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod indicators;
pub mod kernels;
pub mod prelude;
pub mod series;
pub mod traits;
pub mod utils;

// Re-export commonly used types at crate root
pub use analysis::{analyze, Analysis};
pub use batch::BatchProcessor;
pub use engine::{compute_indicators, IndicatorBar};
pub use error::{Error, ErrorKind, Result};
pub use forecast::{forecast, forecast_with, ForecastConfig, ForecastPoint, ForecastResult, TrendModel};
pub use series::{validate_series, PriceBar};
pub use traits::SeriesElement;
pub use utils::{approx_eq, count_nan_prefix, EPSILON, LOOSE_EPSILON};
