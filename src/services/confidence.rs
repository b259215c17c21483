//! Confidence scoring.
//!
//! Five additive components, each clamped at zero, combine into a 0-100 score:
//!
//! | component             | max |
//! |-----------------------|-----|
//! | trend agreement       | 40  |
//! | RSI support           | 20  |
//! | SMA alignment         | 20  |
//! | data quality          | 10  |
//! | volatility stability  | 10  |

use super::indicators::population_std_dev;
use crate::types::{closes, Bar, TimeframeEntry, Trend};

const TREND_WEIGHT: f64 = 40.0;
const RSI_WEIGHT: f64 = 20.0;
const SMA_WEIGHT: f64 = 20.0;
const DATA_QUALITY_WEIGHT: f64 = 10.0;
const VOLATILITY_WEIGHT: f64 = 10.0;

/// RSI below this supports an up call.
const RSI_SUPPORTS_UP_BELOW: f64 = 55.0;
/// RSI above this supports a down call.
const RSI_SUPPORTS_DOWN_ABOVE: f64 = 45.0;

/// Bars a healthy fetch is expected to return for a timeframe label.
///
/// Labels outside the table (monthly, custom) expect nothing.
pub fn expected_bars(label: &str) -> usize {
    match label {
        "weekly" => 250,
        "daily" => 365,
        "4hour" => 200,
        "1hour" => 120,
        _ => 0,
    }
}

/// Individual sub-scores, before rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfidenceBreakdown {
    pub trend_agreement: f64,
    pub rsi_support: f64,
    pub sma_alignment: f64,
    pub data_quality: f64,
    pub volatility_stability: f64,
}

impl ConfidenceBreakdown {
    /// Rounded sum, always in 0-100.
    pub fn total(&self) -> u8 {
        let sum = [
            self.trend_agreement,
            self.rsi_support,
            self.sma_alignment,
            self.data_quality,
            self.volatility_stability,
        ]
        .iter()
        .map(|v| component(*v))
        .sum::<f64>();

        sum.round().clamp(0.0, 100.0) as u8
    }
}

/// Score a completed set of timeframe results against the dominant trend.
pub fn score(
    entries: &[TimeframeEntry],
    dominant: Trend,
    daily_bars: &[Bar],
) -> ConfidenceBreakdown {
    ConfidenceBreakdown {
        trend_agreement: trend_agreement(entries, dominant),
        rsi_support: rsi_support(entries, dominant),
        sma_alignment: sma_alignment(entries, dominant),
        data_quality: data_quality(entries),
        volatility_stability: volatility_stability(daily_bars),
    }
}

/// Missing timeframes count in the denominator but never agree.
fn trend_agreement(entries: &[TimeframeEntry], dominant: Trend) -> f64 {
    let agreeing = entries
        .iter()
        .filter(|e| e.result.trend() == Some(dominant))
        .count();
    component(ratio(agreeing, entries.len()) * TREND_WEIGHT)
}

fn rsi_support(entries: &[TimeframeEntry], dominant: Trend) -> f64 {
    let values: Vec<f64> = entries.iter().filter_map(|e| e.result.rsi()).collect();
    let supporting = values
        .iter()
        .filter(|rsi| match dominant {
            Trend::Up => **rsi < RSI_SUPPORTS_UP_BELOW,
            Trend::Down => **rsi > RSI_SUPPORTS_DOWN_ABOVE,
            Trend::Neutral => false,
        })
        .count();
    component(ratio(supporting, values.len()) * RSI_WEIGHT)
}

fn sma_alignment(entries: &[TimeframeEntry], dominant: Trend) -> f64 {
    let aligned = entries
        .iter()
        .filter(|e| match (e.result.sma50(), e.result.sma200(), dominant) {
            (Some(fast), Some(slow), Trend::Up) => fast > slow,
            (Some(fast), Some(slow), Trend::Down) => fast < slow,
            _ => false,
        })
        .count();
    component(ratio(aligned, entries.len()) * SMA_WEIGHT)
}

fn data_quality(entries: &[TimeframeEntry]) -> f64 {
    let actual: usize = entries.iter().map(|e| e.result.bars()).sum();
    let expected: usize = entries.iter().map(|e| expected_bars(&e.label)).sum();
    component(ratio(actual, expected) * DATA_QUALITY_WEIGHT).min(DATA_QUALITY_WEIGHT)
}

/// Lower daily volatility scores higher.
fn volatility_stability(daily_bars: &[Bar]) -> f64 {
    match population_std_dev(&closes(daily_bars)) {
        Some(std) => component(VOLATILITY_WEIGHT - (std * 2.0).min(VOLATILITY_WEIGHT)),
        None => 0.0,
    }
}

/// `n / d`, or 0 when there is nothing to divide by.
fn ratio(n: usize, d: usize) -> f64 {
    if d == 0 {
        0.0
    } else {
        n as f64 / d as f64
    }
}

/// Clamp a sub-score at zero and drop anything non-finite.
fn component(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
