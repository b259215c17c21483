//! Twelve Data time-series client for intraday FX bars.
//!
//! Values arrive newest first with prices encoded as strings.

use super::BarProvider;
use crate::error::{AppError, Result};
use crate::types::{retain_increasing, Bar, CurrencyPair, TimeframeSource, TimeframeSpec};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const TWELVEDATA_API_URL: &str = "https://api.twelvedata.com";

#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    values: Option<Vec<TimeSeriesValue>>,
    status: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesValue {
    datetime: String,
    open: String,
    high: String,
    low: String,
    close: String,
}

/// Twelve Data REST client.
pub struct TwelveDataClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TwelveDataClient {
    /// Create a new Twelve Data client.
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, pair: &CurrencyPair, spec: &TimeframeSpec) -> Result<String> {
        match &spec.source {
            TimeframeSource::Intraday {
                interval,
                output_size,
            } => Ok(format!(
                "{}/time_series?symbol={}&interval={}&outputsize={}&apikey={}",
                self.base_url,
                pair.intraday_symbol(),
                interval,
                output_size,
                self.api_key
            )),
            TimeframeSource::Aggregates { .. } => Err(AppError::BadRequest(format!(
                "{} is not an intraday timeframe",
                spec.label
            ))),
        }
    }
}

#[async_trait]
impl BarProvider for TwelveDataClient {
    fn name(&self) -> &'static str {
        "twelvedata"
    }

    async fn fetch(&self, pair: &CurrencyPair, spec: &TimeframeSpec) -> Result<Vec<Bar>> {
        let url = self.url(pair, spec)?;
        debug!("Fetching Twelve Data series for {} {}", pair, spec.label);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Twelve Data API error: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let data: TimeSeriesResponse = serde_json::from_str(&body)?;
        Ok(parse_time_series(data))
    }
}

/// Parse a provider timestamp as UTC epoch milliseconds.
///
/// Intraday rows carry `YYYY-MM-DD HH:MM:SS`, daily rows just the date.
fn parse_datetime(s: &str) -> Option<i64> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp_millis());
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

fn parse_value(v: &TimeSeriesValue) -> Option<Bar> {
    Some(Bar::new(
        parse_datetime(&v.datetime)?,
        v.open.parse().ok()?,
        v.high.parse().ok()?,
        v.low.parse().ok()?,
        v.close.parse().ok()?,
    ))
}

fn parse_time_series(data: TimeSeriesResponse) -> Vec<Bar> {
    if data.status.as_deref() == Some("error") {
        debug!("Twelve Data error payload: {:?}", data.message);
        return Vec::new();
    }

    let values = match data.values {
        Some(values) => values,
        None => return Vec::new(),
    };

    // Newest first upstream
    let bars = values.iter().rev().filter_map(parse_value).collect();
    retain_increasing(bars)
}
