//! Dispersion of a price series.

/// Population standard deviation (divides by `n`). `None` for an empty series.
pub fn population_std_dev(series: &[f64]) -> Option<f64> {
    if series.is_empty() {
        return None;
    }

    let n = series.len() as f64;
    let mean = series.iter().sum::<f64>() / n;
    let variance = series.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt())
}
