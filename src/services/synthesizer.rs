//! Reduces per-timeframe results into one overall call.

use super::confidence;
use super::indicators::round_to;
use crate::types::{Advice, Bar, OverallResult, TimeframeEntry, Trend};

/// Average RSI below this with an up trend is a strong buy.
const STRONG_BUY_RSI: f64 = 45.0;
/// Average RSI above this with a down trend is a strong sell.
const STRONG_SELL_RSI: f64 = 55.0;

/// Majority of non-neutral trends; any tie (including none at all) is `Neutral`.
///
/// Counts are order-independent, so reordering the entries never changes the result.
pub fn dominant_trend(entries: &[TimeframeEntry]) -> Trend {
    let (up, down) = entries
        .iter()
        .filter_map(|e| e.result.trend())
        .fold((0usize, 0usize), |(up, down), trend| match trend {
            Trend::Up => (up + 1, down),
            Trend::Down => (up, down + 1),
            Trend::Neutral => (up, down),
        });

    if up > down {
        Trend::Up
    } else if down > up {
        Trend::Down
    } else {
        Trend::Neutral
    }
}

/// Mean of every numeric RSI, rounded to 2 decimals.
pub fn average_rsi(entries: &[TimeframeEntry]) -> Option<f64> {
    let values: Vec<f64> = entries.iter().filter_map(|e| e.result.rsi()).collect();
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(round_to(mean, 2))
}

pub fn advice(dominant: Trend, avg_rsi: Option<f64>) -> Advice {
    match (dominant, avg_rsi) {
        (Trend::Up, Some(rsi)) if rsi < STRONG_BUY_RSI => Advice::StrongBuy,
        (Trend::Down, Some(rsi)) if rsi > STRONG_SELL_RSI => Advice::StrongSell,
        (Trend::Up, _) => Advice::Buy,
        (Trend::Down, _) => Advice::Sell,
        (Trend::Neutral, _) => Advice::Neutral,
    }
}

/// Build the overall result, including the confidence score.
pub fn synthesize(entries: &[TimeframeEntry], daily_bars: &[Bar]) -> OverallResult {
    let dominant = dominant_trend(entries);
    let avg_rsi = average_rsi(entries);

    OverallResult {
        dominant,
        avg_rsi,
        advice: advice(dominant, avg_rsi),
        confidence: confidence::score(entries, dominant, daily_bars).total(),
    }
}
