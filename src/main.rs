use axum::{http::Method, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod config;
mod error;
mod handlers;
mod models;
mod services;
mod state;
mod utils;

use config::Config;
use services::eth_client::EthClient;
use services::prices::FixedPrices;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("portfolio_backend=debug,tower_http=debug")
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let state = AppState {
        chain: Arc::new(EthClient::new(config.rpc_url.clone())),
        prices: Arc::new(FixedPrices::default()),
    };

    // Build application
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/portfolio", get(handlers::portfolio::get_portfolio))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("🚀 Portfolio backend running on http://{} (rpc: {})", addr, config.rpc_url);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
