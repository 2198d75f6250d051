//! Technical analysis indicator kernels.
//!
//! Every kernel here is a pure function over slices, generic over
//! [`SeriesElement`](crate::traits::SeriesElement) (`f32` or `f64`), and
//! returns output of the same length as its input.
//!
//! # Indicators
//!
//! ## Trend
//!
//! - [`sma`] - Simple Moving Average over a trailing window
//! - [`ema`] - Exponential Moving Average, seeded at the first observation
//! - [`macd`] - MACD line, signal line and histogram
//!
//! ## Momentum
//!
//! - [`rsi`] - Relative Strength Index with simple-average smoothing
//! - [`stochastic`] - Stochastic Oscillator %K and %D
//! - [`williams_r`] - Williams %R
//! - [`cci`] - Commodity Channel Index on the typical price
//!
//! ## Volatility
//!
//! - [`bollinger`] - Bollinger Bands with sample standard deviation
//! - [`atr`] - Average True Range
//! - [`true_range`] - single-bar True Range
//!
//! ## Volume
//!
//! - [`obv`] - On-Balance Volume
//!
//! # Warm-up
//!
//! Windowed indicators fill the first values with NaN until their window is
//! full; the `*_lookback` functions give that count. An input shorter than the
//! window is not an error: the output is simply all NaN. The
//! [`engine`](crate::engine) turns these NaNs into `None`.
//!
//! # Example
//!
//! ```
//! use trendcast::indicators::{ema, rsi, sma};
//!
//! let prices = vec![44.0_f64, 44.5, 43.5, 44.5, 44.0, 43.0, 42.5, 43.5, 44.5, 45.0];
//!
//! let sma_result = sma(&prices, 5).unwrap();
//! let ema_result = ema(&prices, 5).unwrap();
//! let rsi_result = rsi(&prices, 5).unwrap();
//! assert_eq!(sma_result.len(), prices.len());
//! assert_eq!(ema_result.len(), prices.len());
//! assert_eq!(rsi_result.len(), prices.len());
//! ```

pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod williams_r;

pub use atr::{atr, atr_lookback, true_range};
pub use bollinger::{bollinger, bollinger_lookback, Bollinger, BollingerOutput};
pub use cci::{cci, cci_lookback, typical_price};
pub use ema::{ema, ema_lookback, ema_with_alpha};
pub use macd::{macd, MacdOutput};
pub use obv::{obv, obv_lookback};
pub use rsi::{rsi, rsi_lookback};
pub use sma::{sma, sma_lookback};
pub use stochastic::{
    stochastic, stochastic_d_lookback, stochastic_k_lookback, StochasticOutput,
};
pub use williams_r::{williams_r, williams_r_lookback};
