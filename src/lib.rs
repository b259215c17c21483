//! fx-confluence - multi-timeframe technical analysis for FX pairs

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use config::Config;
use services::{Analyzer, MarketDataAdapter};
use sources::{PolygonClient, TwelveDataClient};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Locked for the duration of a run; at most one run is in flight.
    pub analyzer: Arc<Mutex<Analyzer>>,
}

impl AppState {
    pub fn new(config: Arc<Config>, analyzer: Analyzer) -> Self {
        Self {
            config,
            analyzer: Arc::new(Mutex::new(analyzer)),
        }
    }
}

/// Wire the upstream clients, adapter and orchestrator from configuration.
pub fn build_analyzer(config: &Config) -> error::Result<Analyzer> {
    let polygon = PolygonClient::new(
        config.polygon_api_key.clone().unwrap_or_default(),
        config.polygon_base_url.clone(),
        config.polygon_limit,
        config.http_timeout(),
    )?;
    let twelvedata = TwelveDataClient::new(
        config.twelvedata_api_key.clone().unwrap_or_default(),
        config.twelvedata_base_url.clone(),
        config.http_timeout(),
    )?;

    let adapter = MarketDataAdapter::new(
        Arc::new(polygon),
        Arc::new(twelvedata),
        config.retry_policy(),
    );

    Ok(Analyzer::new(Arc::new(adapter), config.analyzer_config()))
}

// Re-export commonly used types
pub use error::{AppError, Result};
pub use types::*;
