//! Analysis API endpoints.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use crate::error::{AppError, Result};
use crate::types::{AnalysisRun, CurrencyPair};
use crate::AppState;

/// API response wrapper.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn new(data: T) -> Self {
        Self { data }
    }
}

/// A selectable pair.
#[derive(Debug, Serialize)]
pub struct PairListing {
    pub ticker: String,
    pub display: String,
}

impl From<&CurrencyPair> for PairListing {
    fn from(pair: &CurrencyPair) -> Self {
        Self {
            ticker: pair.aggregates_ticker(),
            display: pair.code(),
        }
    }
}

/// Create the analysis router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pairs", get(list_pairs))
        .route("/analysis/:pair", post(run_analysis))
}

/// List configured pairs.
async fn list_pairs(State(state): State<AppState>) -> Json<ApiResponse<Vec<PairListing>>> {
    let pairs = state.config.pairs.iter().map(PairListing::from).collect();
    Json(ApiResponse::new(pairs))
}

/// Run a full analysis for a pair.
///
/// Only one run may be in flight; a second trigger gets 409 instead of queueing.
async fn run_analysis(
    State(state): State<AppState>,
    Path(pair): Path<String>,
) -> Result<Json<ApiResponse<AnalysisRun>>> {
    let pair = CurrencyPair::parse(&pair)?;

    let analyzer = state.analyzer.try_lock().map_err(|_| {
        AppError::Conflict("An analysis is already running".to_string())
    })?;

    info!("Analysis requested for {}", pair);
    let run = analyzer.run(&pair).await;

    Ok(Json(ApiResponse::new(run)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_listing_from_pair() {
        let pair = CurrencyPair::parse("EUR/JPY").unwrap();
        let listing = PairListing::from(&pair);
        assert_eq!(listing.ticker, "C:EURJPY");
        assert_eq!(listing.display, "EURJPY");
    }

    #[test]
    fn test_api_response_serialization() {
        let json = serde_json::to_value(ApiResponse::new(vec![1, 2])).unwrap();
        assert_eq!(json["data"][1], 2);
    }
}
