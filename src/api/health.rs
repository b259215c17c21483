use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Configured pair count.
    pairs: usize,
    /// Timeframe labels in run order.
    timeframes: Vec<String>,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    // From config; a running analysis holds the analyzer lock.
    let timeframes = state
        .config
        .analyzer_config()
        .timeframes
        .into_iter()
        .map(|spec| spec.label)
        .collect();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        pairs: state.config.pairs.len(),
        timeframes,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}
