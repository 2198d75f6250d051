//! Low-level streaming kernels shared by several indicators.
//!
//! - [`rolling_extrema`]: O(n) rolling max/min via monotonic deques, used by
//!   the Stochastic Oscillator and Williams %R.
//! - [`rolling_sum`]: O(n) rolling mean and sample deviation via shifted
//!   running sums, used by SMA, ATR, RSI and Bollinger Bands.

pub mod rolling_extrema;
pub mod rolling_sum;
