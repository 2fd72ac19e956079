mod catalog;
mod config;
mod handler;
mod render;
mod service;
mod session;
#[cfg(test)]
mod test_support;

use axum::{
    routing::{get, post},
    Router,
};
use config::ApiConfig;
use connectors::{coingecko::CoinGeckoConnector, MarketDataConfig};
use service::{load_catalog, CoinService, SharedService};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn app(service: SharedService) -> Router {
    // Create CORS middleware
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handler::index).post(handler::submit))
        .route("/reload", post(handler::reload_page))
        .route("/api/v1/coins", get(handler::list_coins))
        .route("/api/v1/coins/reload", post(handler::reload_coins))
        .route("/api/v1/calculate", post(handler::calculate))
        .route("/api/v1/status", get(handler::catalog_status))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting coin return calculator");

    // Load configuration from environment
    let api_config = ApiConfig::from_env();
    let market_config = MarketDataConfig::from_env();
    info!("Using market data API at {}", market_config.base_url);

    let connector = Arc::new(CoinGeckoConnector::new(market_config));
    let service = CoinService::new(connector).into_shared();

    // Catalog load starts right away; pages render empty selectors until it finishes
    let loader = Arc::clone(&service);
    tokio::spawn(async move {
        let _ = load_catalog(&loader).await;
    });

    let app = app(service);

    // Start server
    let addr = api_config.socket_addr()?;
    info!("Listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
