//! HTTP Handlers
//!
//! The three `/api/payments` endpoints the checkout page calls, each one
//! relayed to the gateway.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProxyError, Result};
use crate::state::AppState;
use crate::upstream::Forwarded;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub upstream: String,
    pub private_key_configured: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub transaction_id: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = state.upstream.config();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        upstream: config.upstream_url.clone(),
        private_key_configured: config.private_key.is_some(),
    })
}

/// `POST /api/payments/create`
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Forwarded> {
    tracing::info!(
        method = payload["payment_method_type"].as_str().unwrap_or("unknown"),
        "Forwarding payment"
    );
    state.upstream.create_transaction(&payload).await
}

/// `POST /api/payments/verify`
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> Result<Forwarded> {
    if payload.transaction_id.trim().is_empty() {
        return Err(ProxyError::InvalidRequest("INVALID_TRANSACTION_ID"));
    }
    tracing::info!(transaction_id = %payload.transaction_id, "Verifying payment");
    state.upstream.get_transaction(&payload.transaction_id).await
}

/// `GET /api/payments/pse/financial-institutions`
pub async fn financial_institutions(State(state): State<AppState>) -> Result<Forwarded> {
    state.upstream.financial_institutions().await
}
