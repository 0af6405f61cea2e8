//! Checkout Payments Proxy
//!
//! Axum server relaying the checkout page's `/api/payments` calls to the
//! payment gateway, and serving the WASM frontend.

mod config;
mod error;
mod handlers;
mod routes;
mod state;
mod upstream;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ProxyConfig;
use crate::state::AppState;
use crate::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ProxyConfig::from_env()?;

    if config.private_key.is_none() {
        tracing::warn!("⚠ GATEWAY_PRIVATE_KEY not set - the gateway will reject transactions");
    }
    if config.public_key.is_none() {
        tracing::warn!("⚠ GATEWAY_PUBLIC_KEY not set - PSE bank list may be refused");
    }

    let addr = config.bind_addr.clone();
    let upstream_url = config.upstream_url.clone();

    let state = AppState {
        upstream: Arc::new(UpstreamClient::new(config)),
    };
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 checkout proxy running on http://{}", addr);
    tracing::info!("  upstream gateway: {}", upstream_url);
    tracing::info!("  POST /api/payments/create");
    tracing::info!("  POST /api/payments/verify");
    tracing::info!("  GET  /api/payments/pse/financial-institutions");

    axum::serve(listener, app).await?;

    Ok(())
}
