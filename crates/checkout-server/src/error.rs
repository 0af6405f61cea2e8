//! Proxy Error Types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProxyError>;

#[derive(Error, Debug)]
pub enum ProxyError {
    /// Gateway API could not be reached or answered unreadably
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Request body parsed but carries an unusable value
    #[error("Invalid request: {0}")]
    InvalidRequest(&'static str),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ProxyError::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                "Payment gateway unavailable",
            ),
            ProxyError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROXY_MISCONFIGURED",
                "Service configuration error",
            ),
            ProxyError::InvalidRequest(code) => {
                (StatusCode::UNPROCESSABLE_ENTITY, *code, "Invalid request")
            }
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: message.into(),
                code: code.into(),
            }),
        )
            .into_response()
    }
}
