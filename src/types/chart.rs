use serde::{Deserialize, Serialize};

/// Candle in the shape chart libraries expect (time in seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Single value of a line series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub time: i64,
    pub value: f64,
}

/// Render-ready view of the daily snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub candles: Vec<CandlePoint>,
    pub rsi: Vec<LinePoint>,
    /// Set when upstream timestamps were not strictly increasing and got
    /// replaced with synthetic hourly spacing.
    pub repaired: bool,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}
