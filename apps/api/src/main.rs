//! University map API server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use uni_map_api::config::ApiConfig;
use uni_map_api::openalex::OpenAlexClient;
use uni_map_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let config = ApiConfig::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!(
        openalex = %config.openalex_url,
        country_code = %config.country_code,
        "starting university map API"
    );

    let source = OpenAlexClient::new(&config.openalex_url, &config.country_code)
        .context("failed to build OpenAlex client")?;
    let state = Arc::new(AppState::new(Arc::new(source), config.per_page));

    let origin = HeaderValue::from_str(&config.allowed_origin)
        .with_context(|| format!("invalid allowed origin {:?}", config.allowed_origin))?;
    let app = uni_map_api::router(state, origin);

    let addr: SocketAddr = config
        .listen
        .parse()
        .with_context(|| format!("invalid listen address {:?}", config.listen))?;

    info!("API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server failed")?;

    Ok(())
}
