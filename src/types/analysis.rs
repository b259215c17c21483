use super::{Bar, ChartData, CurrencyPair};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker recorded for a timeframe that produced no bars even after fallback.
pub const NO_DATA: &str = "No data";

/// Moving-average crossover direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Up => "Up",
            Trend::Down => "Down",
            Trend::Neutral => "Neutral",
        };
        write!(f, "{}", s)
    }
}

/// Indicator values computed for one timeframe.
///
/// `None` means "not available": the series was shorter than the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeMetrics {
    pub close: f64,
    pub rsi: Option<f64>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub trend: Trend,
    pub bars: usize,
}

/// Outcome for one timeframe of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeframeResult {
    Missing { error: String, bars: usize },
    Computed(TimeframeMetrics),
}

impl TimeframeResult {
    pub fn no_data() -> Self {
        TimeframeResult::Missing {
            error: NO_DATA.to_string(),
            bars: 0,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, TimeframeResult::Missing { .. })
    }

    pub fn metrics(&self) -> Option<&TimeframeMetrics> {
        match self {
            TimeframeResult::Computed(m) => Some(m),
            TimeframeResult::Missing { .. } => None,
        }
    }

    /// Missing timeframes carry no trend at all, not `Neutral`.
    pub fn trend(&self) -> Option<Trend> {
        self.metrics().map(|m| m.trend)
    }

    pub fn rsi(&self) -> Option<f64> {
        self.metrics().and_then(|m| m.rsi)
    }

    pub fn sma50(&self) -> Option<f64> {
        self.metrics().and_then(|m| m.sma50)
    }

    pub fn sma200(&self) -> Option<f64> {
        self.metrics().and_then(|m| m.sma200)
    }

    pub fn bars(&self) -> usize {
        match self {
            TimeframeResult::Computed(m) => m.bars,
            TimeframeResult::Missing { bars, .. } => *bars,
        }
    }
}

/// A timeframe label paired with its result, kept in run order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeEntry {
    pub label: String,
    pub result: TimeframeResult,
}

impl TimeframeEntry {
    pub fn new(label: impl Into<String>, result: TimeframeResult) -> Self {
        Self {
            label: label.into(),
            result,
        }
    }
}

/// Final recommendation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advice {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "NEUTRAL")]
    Neutral,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "STRONG SELL")]
    StrongSell,
}

impl Advice {
    pub fn label(&self) -> &'static str {
        match self {
            Advice::StrongBuy => "STRONG BUY",
            Advice::Buy => "BUY",
            Advice::Neutral => "NEUTRAL",
            Advice::Sell => "SELL",
            Advice::StrongSell => "STRONG SELL",
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Cross-timeframe summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallResult {
    pub dominant: Trend,
    pub avg_rsi: Option<f64>,
    pub advice: Advice,
    /// 0-100.
    pub confidence: u8,
}

/// Everything one analysis run hands to the display layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRun {
    pub pair: CurrencyPair,
    pub timeframes: Vec<TimeframeEntry>,
    pub overall: OverallResult,
    pub daily_bars: Vec<Bar>,
    pub chart: ChartData,
    pub started_at: i64,
    pub finished_at: i64,
}

impl AnalysisRun {
    /// Look up a timeframe result by label.
    pub fn result(&self, label: &str) -> Option<&TimeframeResult> {
        self.timeframes
            .iter()
            .find(|e| e.label == label)
            .map(|e| &e.result)
    }
}
