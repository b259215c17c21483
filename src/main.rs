use fx_confluence::config::Config;
use fx_confluence::{api, build_analyzer, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fx_confluence=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting fx-confluence on {}:{}", config.host, config.port);

    if config.polygon_api_key.is_none() {
        warn!("POLYGON_API_KEY not set, weekly/daily requests will return no data");
    }
    if config.twelvedata_api_key.is_none() {
        warn!("TWELVEDATA_API_KEY not set, intraday timeframes will fall back to daily bars");
    }

    let analyzer = build_analyzer(&config)?;
    info!(
        "Analyzing {} timeframes, {} pairs available",
        analyzer.config().timeframes.len(),
        config.pairs.len()
    );

    let app = api::app(AppState::new(config.clone(), analyzer));

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("fx-confluence listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
