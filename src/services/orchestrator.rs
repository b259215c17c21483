//! Timeframe orchestrator.
//!
//! Walks the configured timeframes in order, one at a time, and turns each
//! into a `TimeframeResult`. Intraday timeframes with no data fall back to the
//! run's daily bars, so every run produces a full report.

use super::bar_source::BarSource;
use super::chart::build_chart;
use super::indicators::{round_to, rsi, sma, trend, RSI_PERIOD, SMA_LONG, SMA_SHORT};
use super::synthesizer::synthesize;
use crate::types::{
    closes, AnalysisRun, Bar, CurrencyPair, TimeframeEntry, TimeframeMetrics, TimeframeResult,
    TimeframeSpec, DEFAULT_INTRADAY_OUTPUT_SIZE,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Static settings for the orchestrator.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Processed in this order.
    pub timeframes: Vec<TimeframeSpec>,
    /// Timeframe whose bars form the daily snapshot and the intraday fallback.
    pub daily: TimeframeSpec,
    /// Delay before every timeframe after the first.
    pub pacing: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            timeframes: TimeframeSpec::default_set(DEFAULT_INTRADAY_OUTPUT_SIZE),
            daily: TimeframeSpec::daily(),
            pacing: Duration::from_millis(600),
        }
    }
}

/// State local to one run. Nothing here outlives `Analyzer::run`.
#[derive(Default)]
struct RunContext {
    entries: Vec<TimeframeEntry>,
    daily_bars: Vec<Bar>,
}

/// Runs the multi-timeframe analysis for a pair.
pub struct Analyzer {
    source: Arc<dyn BarSource>,
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(source: Arc<dyn BarSource>, config: AnalyzerConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze every configured timeframe and synthesize the overall call.
    ///
    /// Never fails: timeframes without data are recorded as "No data" and the
    /// remaining ones are still computed.
    pub async fn run(&self, pair: &CurrencyPair) -> AnalysisRun {
        let started_at = chrono::Utc::now().timestamp_millis();
        info!(
            "Starting analysis for {} across {} timeframes",
            pair,
            self.config.timeframes.len()
        );

        let mut ctx = RunContext::default();

        for (i, spec) in self.config.timeframes.iter().enumerate() {
            if i != 0 && !self.config.pacing.is_zero() {
                tokio::time::sleep(self.config.pacing).await;
            }

            let bars = self.bars_for(pair, spec, &mut ctx).await;
            let result = evaluate(&bars);

            debug!(
                "{} {}: {} bars, trend {:?}",
                pair,
                spec.label,
                result.bars(),
                result.trend()
            );
            ctx.entries.push(TimeframeEntry::new(spec.label.clone(), result));
        }

        let overall = synthesize(&ctx.entries, &ctx.daily_bars);
        let finished_at = chrono::Utc::now().timestamp_millis();
        let chart = build_chart(&ctx.daily_bars, finished_at.div_euclid(1000));

        info!(
            "Analysis for {} finished: {} ({:?}, confidence {}%)",
            pair, overall.advice, overall.dominant, overall.confidence
        );

        AnalysisRun {
            pair: pair.clone(),
            timeframes: ctx.entries,
            overall,
            daily_bars: ctx.daily_bars,
            chart,
            started_at,
            finished_at,
        }
    }

    /// Fetch bars for one timeframe, applying the intraday fallback.
    async fn bars_for(
        &self,
        pair: &CurrencyPair,
        spec: &TimeframeSpec,
        ctx: &mut RunContext,
    ) -> Vec<Bar> {
        let bars = self.source.fetch_bars(pair, spec).await;

        if spec.label == self.config.daily.label && !bars.is_empty() {
            ctx.daily_bars = bars.clone();
        }

        if !bars.is_empty() || !spec.is_intraday() {
            return bars;
        }

        if ctx.daily_bars.is_empty() {
            ctx.daily_bars = self.source.fetch_bars(pair, &self.config.daily).await;
        }

        if !ctx.daily_bars.is_empty() {
            warn!(
                "No {} data for {}, falling back to {} daily bars",
                spec.label,
                pair,
                ctx.daily_bars.len()
            );
        }

        ctx.daily_bars.clone()
    }
}

/// Compute indicators for one timeframe's bars.
///
/// Trend is classified from the raw averages; the stored values are rounded
/// (RSI to 2 decimals, SMAs to 6).
pub fn evaluate(bars: &[Bar]) -> TimeframeResult {
    let last = match bars.last() {
        Some(bar) => bar,
        None => return TimeframeResult::no_data(),
    };

    let closes = closes(bars);
    let sma50 = sma(&closes, SMA_SHORT);
    let sma200 = sma(&closes, SMA_LONG);
    let rsi = rsi(&closes, RSI_PERIOD);

    TimeframeResult::Computed(TimeframeMetrics {
        close: last.close,
        rsi: rsi.map(|v| round_to(v, 2)),
        sma50: sma50.map(|v| round_to(v, 6)),
        sma200: sma200.map(|v| round_to(v, 6)),
        trend: trend(sma50, sma200),
        bars: bars.len(),
    })
}
