use crate::services::{AnalyzerConfig, RetryPolicy};
use crate::sources::polygon::POLYGON_API_URL;
use crate::sources::twelvedata::TWELVEDATA_API_URL;
use crate::types::{CurrencyPair, TimeframeSpec, DEFAULT_INTRADAY_OUTPUT_SIZE};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Pairs offered when `FX_PAIRS` is not set.
pub const DEFAULT_PAIRS: &[&str] = &[
    "C:EURUSD", "C:GBPUSD", "C:USDJPY", "C:USDCAD", "C:AUDUSD", "C:NZDUSD", "C:EURGBP", "C:EURJPY",
    "C:GBPJPY", "C:CHFJPY", "C:AUDJPY", "C:NZDJPY", "C:EURCAD", "C:GBPCAD", "C:CADJPY", "C:USDCHF",
    "C:EURCHF", "C:GBPCHF", "C:AUDCAD", "C:NZDCAD",
];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Polygon API key for weekly/daily aggregates.
    pub polygon_api_key: Option<String>,
    /// Twelve Data API key for intraday series.
    pub twelvedata_api_key: Option<String>,
    pub polygon_base_url: String,
    pub twelvedata_base_url: String,
    /// Pairs offered to the display layer.
    pub pairs: Vec<CurrencyPair>,
    /// Delay between timeframe fetches (ms).
    pub pacing_ms: u64,
    /// Total attempts per fetch when upstream returns nothing.
    pub retry_attempts: u32,
    /// Delay before a retry (ms).
    pub retry_backoff_ms: u64,
    /// Maximum bars requested from Polygon.
    pub polygon_limit: u32,
    /// Points requested per intraday series.
    pub intraday_output_size: u32,
    /// Upstream request timeout (seconds).
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to `Config::default()`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        // Format: "C:EURUSD,GBPUSD,USD/JPY"; invalid entries are skipped
        let pairs = env::var("FX_PAIRS")
            .ok()
            .map(|s| parse_pairs(s.split(',')))
            .filter(|pairs| !pairs.is_empty())
            .unwrap_or(defaults.pairs);

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT").unwrap_or(defaults.port),
            polygon_api_key: env::var("POLYGON_API_KEY").ok(),
            twelvedata_api_key: env::var("TWELVEDATA_API_KEY").ok(),
            polygon_base_url: env::var("POLYGON_BASE_URL").unwrap_or(defaults.polygon_base_url),
            twelvedata_base_url: env::var("TWELVEDATA_BASE_URL")
                .unwrap_or(defaults.twelvedata_base_url),
            pairs,
            pacing_ms: env_parse("PACING_MS").unwrap_or(defaults.pacing_ms),
            retry_attempts: env_parse("RETRY_ATTEMPTS").unwrap_or(defaults.retry_attempts),
            retry_backoff_ms: env_parse("RETRY_BACKOFF_MS").unwrap_or(defaults.retry_backoff_ms),
            polygon_limit: env_parse("POLYGON_LIMIT").unwrap_or(defaults.polygon_limit),
            intraday_output_size: env_parse("INTRADAY_OUTPUT_SIZE")
                .unwrap_or(defaults.intraday_output_size),
            http_timeout_secs: env_parse("HTTP_TIMEOUT_SECS").unwrap_or(defaults.http_timeout_secs),
        }
    }

    /// Timeframe table and pacing for the orchestrator.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            timeframes: TimeframeSpec::default_set(self.intraday_output_size),
            daily: TimeframeSpec::daily(),
            pacing: Duration::from_millis(self.pacing_ms),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_attempts,
            backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Built-in settings. Does not read the environment.
impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            polygon_api_key: None,
            twelvedata_api_key: None,
            polygon_base_url: POLYGON_API_URL.to_string(),
            twelvedata_base_url: TWELVEDATA_API_URL.to_string(),
            pairs: default_pairs(),
            pacing_ms: 600,
            retry_attempts: 2,
            retry_backoff_ms: 700,
            polygon_limit: 500,
            intraday_output_size: DEFAULT_INTRADAY_OUTPUT_SIZE,
            http_timeout_secs: 30,
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn parse_pairs<'a>(items: impl Iterator<Item = &'a str>) -> Vec<CurrencyPair> {
    items
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| CurrencyPair::parse(s).ok())
        .collect()
}

fn default_pairs() -> Vec<CurrencyPair> {
    parse_pairs(DEFAULT_PAIRS.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn test_default_settings() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.polygon_api_key, None);
        assert_eq!(config.twelvedata_api_key, None);
        assert_eq!(config.polygon_base_url, POLYGON_API_URL);
        assert_eq!(config.twelvedata_base_url, TWELVEDATA_API_URL);
        assert_eq!(config.pairs, default_pairs());
        assert_eq!(config.pacing_ms, 600);
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.polygon_limit, 500);
        assert_eq!(config.intraday_output_size, 500);
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_pairs_all_parse() {
        let pairs = default_pairs();
        assert_eq!(pairs.len(), DEFAULT_PAIRS.len());
        assert_eq!(pairs[0].code(), "EURUSD");
        assert_eq!(pairs[19].code(), "NZDCAD");
    }

    #[test]
    fn test_parse_pairs_skips_invalid() {
        let pairs = parse_pairs("EURUSD, bogus,,GBP/JPY".split(','));
        let codes: Vec<String> = pairs.iter().map(|p| p.code()).collect();
        assert_eq!(codes, vec!["EURUSD", "GBPJPY"]);
    }

    #[test]
    fn test_analyzer_config_from_settings() {
        let mut config = config();
        config.intraday_output_size = 250;
        config.pacing_ms = 0;

        let analyzer = config.analyzer_config();
        assert_eq!(analyzer.timeframes.len(), 4);
        assert_eq!(analyzer.timeframes[2], TimeframeSpec::four_hour(250));
        assert_eq!(analyzer.daily, TimeframeSpec::daily());
        assert!(analyzer.pacing.is_zero());
    }

    #[test]
    fn test_retry_policy_from_settings() {
        let mut config = config();
        config.retry_attempts = 3;
        config.retry_backoff_ms = 50;

        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff, Duration::from_millis(50));
    }

    #[test]
    fn test_config_clone() {
        let config = config();
        let cloned = config.clone();
        assert_eq!(cloned.host, config.host);
        assert_eq!(cloned.port, config.port);
        assert_eq!(cloned.pairs, config.pairs);
        assert_eq!(cloned.http_timeout(), Duration::from_secs(30));
    }
}
