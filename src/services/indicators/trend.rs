//! Moving-average crossover trend.

use crate::types::Trend;

/// Classify trend from the fast and slow SMA.
///
/// Unavailable inputs propagate as `Neutral` instead of guessing.
pub fn trend(sma_short: Option<f64>, sma_long: Option<f64>) -> Trend {
    match (sma_short, sma_long) {
        (Some(fast), Some(slow)) if fast > slow => Trend::Up,
        (Some(fast), Some(slow)) if fast < slow => Trend::Down,
        _ => Trend::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_direction() {
        assert_eq!(trend(Some(1.2), Some(1.1)), Trend::Up);
        assert_eq!(trend(Some(1.0), Some(1.1)), Trend::Down);
        assert_eq!(trend(Some(1.1), Some(1.1)), Trend::Neutral);
    }

    #[test]
    fn test_trend_unavailable_is_neutral() {
        assert_eq!(trend(None, Some(1.1)), Trend::Neutral);
        assert_eq!(trend(Some(1.1), None), Trend::Neutral);
        assert_eq!(trend(None, None), Trend::Neutral);
    }

    #[test]
    fn test_trend_nan_is_neutral() {
        assert_eq!(trend(Some(f64::NAN), Some(1.0)), Trend::Neutral);
    }
}
