//! Analysis pipeline: bar acquisition, indicators, synthesis and scoring.

pub mod bar_source;
pub mod chart;
pub mod confidence;
pub mod indicators;
pub mod orchestrator;
pub mod synthesizer;

pub use bar_source::{BarSource, MarketDataAdapter, RetryPolicy};
pub use chart::build_chart;
pub use confidence::{expected_bars, ConfidenceBreakdown};
pub use orchestrator::{evaluate, Analyzer, AnalyzerConfig};
pub use synthesizer::{advice, average_rsi, dominant_trend, synthesize};
