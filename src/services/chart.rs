//! Builds the chart payload from the daily snapshot.

use super::indicators::{round_to, rsi_series, RSI_PERIOD};
use crate::types::{Bar, CandlePoint, ChartData, LinePoint};
use tracing::warn;

/// Spacing used when upstream timestamps have to be replaced.
const SYNTHETIC_SPACING_SECS: i64 = 3600;

/// Convert bars to second-resolution candles plus an RSI line.
///
/// Chart libraries reject non-increasing times, so a corrupt sequence is
/// re-timed with regular hourly spacing ending at `now_secs`.
pub fn build_chart(bars: &[Bar], now_secs: i64) -> ChartData {
    if bars.is_empty() {
        return ChartData::default();
    }

    let mut candles: Vec<CandlePoint> = bars
        .iter()
        .map(|b| CandlePoint {
            time: b.time.div_euclid(1000),
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
        })
        .collect();

    let repaired = !candles.windows(2).all(|w| w[1].time > w[0].time);
    if repaired {
        warn!(
            "Chart timestamps not strictly increasing across {} candles, re-timing",
            candles.len()
        );
        let base = now_secs - candles.len() as i64 * SYNTHETIC_SPACING_SECS;
        for (i, candle) in candles.iter_mut().enumerate() {
            candle.time = base + i as i64 * SYNTHETIC_SPACING_SECS;
        }
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let rsi = rsi_series(&closes, RSI_PERIOD)
        .into_iter()
        .map(|(i, value)| LinePoint {
            time: candles[i].time,
            value: round_to(value, 2),
        })
        .collect();

    ChartData {
        candles,
        rsi,
        repaired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let c = 1.0 + i as f64 * 0.001;
                Bar::new(1_700_000_000_000 + i as i64 * 86_400_000, c, c, c, c)
            })
            .collect()
    }

    #[test]
    fn test_empty_bars() {
        let chart = build_chart(&[], 0);
        assert!(chart.is_empty());
        assert!(chart.rsi.is_empty());
        assert!(!chart.repaired);
    }

    #[test]
    fn test_times_converted_to_seconds() {
        let chart = build_chart(&daily(3), 0);
        assert_eq!(chart.candles[0].time, 1_700_000_000);
        assert_eq!(chart.candles[1].time, 1_700_086_400);
        assert!(!chart.repaired);
    }

    #[test]
    fn test_rsi_line_starts_after_warmup() {
        let chart = build_chart(&daily(20), 0);
        assert_eq!(chart.rsi.len(), 20 - RSI_PERIOD);
        assert_eq!(chart.rsi[0].time, chart.candles[RSI_PERIOD].time);
        assert_eq!(chart.rsi[0].value, 100.0);
    }

    #[test]
    fn test_duplicate_times_repaired() {
        let mut bars = daily(4);
        bars[2].time = bars[1].time;
        let now = 1_800_000_000;
        let chart = build_chart(&bars, now);
        assert!(chart.repaired);
        let times: Vec<i64> = chart.candles.iter().map(|c| c.time).collect();
        let base = now - 4 * 3600;
        assert_eq!(times, vec![base, base + 3600, base + 7200, base + 10800]);
    }

    #[test]
    fn test_same_second_after_truncation_repaired() {
        let bars = vec![
            Bar::new(1_000, 1.0, 1.0, 1.0, 1.0),
            Bar::new(1_500, 1.0, 1.0, 1.0, 1.0),
        ];
        assert!(build_chart(&bars, 10_000).repaired);
    }
}
