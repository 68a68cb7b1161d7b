//! Stateless windowed transforms over price sequences.
//!
//! Every function returns output aligned index-for-index with its input.
//! Indices before a window fills are NaN, never an error.

pub mod levels;
pub mod momentum;
pub mod moving_average;
pub mod trend;
pub mod volatility;

pub use levels::{FIBONACCI_RATIOS, FibonacciLevel, PivotPoints, fibonacci_retracements, pivot_points};
pub use momentum::{MacdLines, StochasticLines, macd, momentum, roc, rsi, stochastic};
pub use moving_average::{ema, hma, sma, wma};
pub use trend::{AdxLines, adx, true_range};
pub use volatility::{Bands, atr, bollinger_bands, donchian_channel};
