use serde::{Deserialize, Serialize};

/// One OHLC price observation for a fixed time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bucket start, epoch milliseconds.
    #[serde(rename = "t")]
    pub time: i64,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
}

impl Bar {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    /// True when every price is a finite number.
    pub fn is_finite(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
    }
}

/// Extract close prices from a slice of bars.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Drop bars that would break strict time ordering or carry non-finite prices.
///
/// The first bar of any duplicated or out-of-order run wins.
pub fn retain_increasing(bars: Vec<Bar>) -> Vec<Bar> {
    let mut out: Vec<Bar> = Vec::with_capacity(bars.len());
    for bar in bars {
        if !bar.is_finite() {
            continue;
        }
        if out.last().map_or(true, |last| bar.time > last.time) {
            out.push(bar);
        }
    }
    out
}
