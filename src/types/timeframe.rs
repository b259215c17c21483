use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default number of points requested from the intraday provider.
pub const DEFAULT_INTRADAY_OUTPUT_SIZE: u32 = 500;

/// Aggregation unit understood by the aggregates provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateUnit {
    Day,
    Week,
    Month,
}

impl AggregateUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateUnit::Day => "day",
            AggregateUnit::Week => "week",
            AggregateUnit::Month => "month",
        }
    }
}

/// Which upstream serves a timeframe, with its source-specific parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum TimeframeSource {
    /// Large-granularity aggregated bars over a date range ending today.
    #[serde(rename_all = "camelCase")]
    Aggregates {
        multiplier: u32,
        unit: AggregateUnit,
        lookback_months: u32,
    },
    /// Most recent `output_size` intraday points at a fixed interval.
    #[serde(rename_all = "camelCase")]
    Intraday { interval: String, output_size: u32 },
}

/// One analysis granularity. Static configuration, never mutated during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeframeSpec {
    pub label: String,
    #[serde(flatten)]
    pub source: TimeframeSource,
}

impl TimeframeSpec {
    pub fn aggregates(
        label: &str,
        multiplier: u32,
        unit: AggregateUnit,
        lookback_months: u32,
    ) -> Self {
        Self {
            label: label.to_string(),
            source: TimeframeSource::Aggregates {
                multiplier,
                unit,
                lookback_months,
            },
        }
    }

    pub fn intraday(label: &str, interval: &str, output_size: u32) -> Self {
        Self {
            label: label.to_string(),
            source: TimeframeSource::Intraday {
                interval: interval.to_string(),
                output_size,
            },
        }
    }

    /// Monthly bars over the last ten years.
    pub fn monthly() -> Self {
        Self::aggregates("monthly", 1, AggregateUnit::Month, 120)
    }

    /// Weekly bars over the last five years.
    pub fn weekly() -> Self {
        Self::aggregates("weekly", 1, AggregateUnit::Week, 60)
    }

    /// Daily bars over the last year.
    pub fn daily() -> Self {
        Self::aggregates("daily", 1, AggregateUnit::Day, 12)
    }

    pub fn four_hour(output_size: u32) -> Self {
        Self::intraday("4hour", "4h", output_size)
    }

    pub fn one_hour(output_size: u32) -> Self {
        Self::intraday("1hour", "1h", output_size)
    }

    /// The standard analysis order: weekly, daily, 4hour, 1hour.
    pub fn default_set(output_size: u32) -> Vec<Self> {
        vec![
            Self::weekly(),
            Self::daily(),
            Self::four_hour(output_size),
            Self::one_hour(output_size),
        ]
    }

    /// Intraday granularities fall back to daily bars when their provider is empty.
    pub fn is_intraday(&self) -> bool {
        matches!(self.source, TimeframeSource::Intraday { .. })
    }

    /// Inclusive `(from, to)` date range for aggregates, `None` for intraday.
    pub fn date_range(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self.source {
            TimeframeSource::Aggregates {
                lookback_months, ..
            } => {
                let from = today
                    .checked_sub_months(Months::new(lookback_months))
                    .unwrap_or(NaiveDate::MIN);
                Some((from, today))
            }
            TimeframeSource::Intraday { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_order() {
        let labels: Vec<String> = TimeframeSpec::default_set(500)
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec!["weekly", "daily", "4hour", "1hour"]);
    }

    #[test]
    fn test_is_intraday() {
        assert!(!TimeframeSpec::weekly().is_intraday());
        assert!(!TimeframeSpec::daily().is_intraday());
        assert!(!TimeframeSpec::monthly().is_intraday());
        assert!(TimeframeSpec::four_hour(500).is_intraday());
        assert!(TimeframeSpec::one_hour(500).is_intraday());
    }

    #[test]
    fn test_date_range() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (from, to) = TimeframeSpec::weekly().date_range(today).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2019, 3, 15).unwrap());
        assert_eq!(to, today);

        let (from, _) = TimeframeSpec::daily().date_range(today).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());

        assert!(TimeframeSpec::one_hour(500).date_range(today).is_none());
    }

    #[test]
    fn test_spec_serialization() {
        let json = serde_json::to_value(TimeframeSpec::four_hour(300)).unwrap();
        assert_eq!(json["label"], "4hour");
        assert_eq!(json["source"], "intraday");
        assert_eq!(json["interval"], "4h");
        assert_eq!(json["outputSize"], 300);
    }
}
