//! Relative Strength Index (RSI) indicator.

/// Lookback used throughout the analysis.
pub const RSI_PERIOD: usize = 14;

/// RSI over the last `period` price changes.
///
/// Single-window definition: gains and losses are plain sums over the window,
/// not Wilder's recursive smoothing, so values computed on growing prefixes
/// are not continuous with each other. Values range from 0-100; a window with
/// no losses is 100.
pub fn rsi(series: &[f64], period: usize) -> Option<f64> {
    if period == 0 || series.len() < period + 1 {
        return None;
    }

    let window = &series[series.len() - period - 1..];
    let (gains, losses) = window
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0, 0.0), |(gains, losses), change| {
            if change > 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses - change)
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

/// RSI of every prefix `series[..=i]` long enough to have one, as `(i, value)`.
pub fn rsi_series(series: &[f64], period: usize) -> Vec<(usize, f64)> {
    (0..series.len())
        .filter_map(|i| rsi(&series[..=i], period).map(|v| (i, v)))
        .collect()
}
