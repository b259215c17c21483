//! Simple Moving Average (SMA) indicator.

/// Fast window used for trend classification.
pub const SMA_SHORT: usize = 50;
/// Slow window used for trend classification.
pub const SMA_LONG: usize = 200;

/// Arithmetic mean of the last `period` values.
///
/// Recomputed from scratch on every call; returns `None` when the series is
/// shorter than `period` (or `period` is zero).
pub fn sma(series: &[f64], period: usize) -> Option<f64> {
    if period == 0 || series.len() < period {
        return None;
    }

    let sum: f64 = series.iter().rev().take(period).sum();
    Some(sum / period as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_insufficient_data() {
        assert_eq!(sma(&[1.0, 2.0], 3), None);
        assert_eq!(sma(&[], 1), None);
    }

    #[test]
    fn test_sma_zero_period() {
        assert_eq!(sma(&[1.0, 2.0], 0), None);
    }

    #[test]
    fn test_sma_uses_tail() {
        let series = [100.0, 1.0, 2.0, 3.0];
        assert_eq!(sma(&series, 3), Some(2.0));
    }

    #[test]
    fn test_sma_exact_length() {
        let series: Vec<f64> = (1..=50).map(|v| v as f64).collect();
        assert_eq!(sma(&series, SMA_SHORT), Some(25.5));
        assert_eq!(sma(&series, SMA_LONG), None);
    }
}
