//! Polygon aggregates client for weekly, daily and monthly FX bars.

use super::BarProvider;
use crate::error::{AppError, Result};
use crate::types::{retain_increasing, Bar, CurrencyPair, TimeframeSource, TimeframeSpec};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const POLYGON_API_URL: &str = "https://api.polygon.io";

/// Aggregates response. Only the fields we use.
#[derive(Debug, Deserialize)]
struct AggregatesResponse {
    results: Option<Vec<Aggregate>>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Aggregate {
    t: i64,
    o: f64,
    h: f64,
    l: f64,
    c: f64,
}

/// Polygon REST client.
pub struct PolygonClient {
    client: Client,
    api_key: String,
    base_url: String,
    limit: u32,
}

impl PolygonClient {
    /// Create a new Polygon client.
    pub fn new(api_key: String, base_url: String, limit: u32, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            limit,
        })
    }

    fn url(&self, pair: &CurrencyPair, spec: &TimeframeSpec) -> Result<String> {
        let (multiplier, unit) = match &spec.source {
            TimeframeSource::Aggregates {
                multiplier, unit, ..
            } => (*multiplier, *unit),
            TimeframeSource::Intraday { .. } => {
                return Err(AppError::BadRequest(format!(
                    "{} is not an aggregates timeframe",
                    spec.label
                )))
            }
        };

        let today = chrono::Utc::now().date_naive();
        let (from, to) = spec.date_range(today).unwrap_or((today, today));

        Ok(format!(
            "{}/v2/aggs/ticker/{}/range/{}/{}/{}/{}?sort=asc&limit={}&apiKey={}",
            self.base_url,
            pair.aggregates_ticker(),
            multiplier,
            unit.as_str(),
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d"),
            self.limit,
            self.api_key
        ))
    }
}

#[async_trait]
impl BarProvider for PolygonClient {
    fn name(&self) -> &'static str {
        "polygon"
    }

    async fn fetch(&self, pair: &CurrencyPair, spec: &TimeframeSpec) -> Result<Vec<Bar>> {
        let url = self.url(pair, spec)?;
        debug!("Fetching Polygon aggregates for {} {}", pair, spec.label);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Polygon API error: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let data: AggregatesResponse = serde_json::from_str(&body)?;
        Ok(parse_aggregates(data))
    }
}

fn parse_aggregates(data: AggregatesResponse) -> Vec<Bar> {
    let results = match data.results {
        Some(results) => results,
        None => {
            debug!("Polygon returned no results (status {:?})", data.status);
            return Vec::new();
        }
    };

    retain_increasing(
        results
            .into_iter()
            .map(|a| Bar::new(a.t, a.o, a.h, a.l, a.c))
            .collect(),
    )
}
