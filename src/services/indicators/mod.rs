//! Technical indicator implementations.
//!
//! All functions take close prices in ascending time order and return `None`
//! when the series is too short for the window.

pub mod rsi;
pub mod sma;
pub mod trend;
pub mod volatility;

pub use rsi::{rsi, rsi_series, RSI_PERIOD};
pub use sma::{sma, SMA_LONG, SMA_SHORT};
pub use trend::trend;
pub use volatility::population_std_dev;

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
