//! Upstream Gateway Client
//!
//! Forwards checkout calls to the gateway's REST API and hands back whatever
//! it answered. No retries, no rewriting of bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::config::ProxyConfig;
use crate::error::{ProxyError, Result};

/// Upstream answer relayed verbatim
#[derive(Debug)]
pub struct Forwarded {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for Forwarded {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub struct UpstreamClient {
    client: reqwest::Client,
    config: ProxyConfig,
}

impl UpstreamClient {
    pub fn new(config: ProxyConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// `POST {upstream}/transactions`
    pub async fn create_transaction(&self, body: &Value) -> Result<Forwarded> {
        let url = self.url(&["transactions"])?;
        let request = self.client.post(url).json(body);
        self.forward(authorize(request, self.config.private_key.as_deref())).await
    }

    /// `GET {upstream}/transactions/{id}`
    pub async fn get_transaction(&self, transaction_id: &str) -> Result<Forwarded> {
        let url = self.url(&["transactions", transaction_id])?;
        let request = self.client.get(url);
        self.forward(authorize(request, self.config.private_key.as_deref())).await
    }

    /// `GET {upstream}/pse/financial_institutions`
    pub async fn financial_institutions(&self) -> Result<Forwarded> {
        let url = self.url(&["pse", "financial_institutions"])?;
        let request = self.client.get(url);
        self.forward(authorize(request, self.config.public_key.as_deref())).await
    }

    /// Upstream URL with `segments` appended, each percent-encoded
    fn url(&self, segments: &[&str]) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.config.upstream_url)
            .map_err(|e| ProxyError::Config(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ProxyError::Config("upstream URL cannot have a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn forward(&self, request: reqwest::RequestBuilder) -> Result<Forwarded> {
        let response = request
            .send()
            .await
            .map_err(|e| ProxyError::Upstream(e.to_string()))?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let text = response
            .text()
            .await
            .map_err(|e| ProxyError::Upstream(e.to_string()))?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        tracing::debug!(status = status.as_u16(), "Upstream answered");
        Ok(Forwarded { status, body })
    }
}

fn authorize(request: reqwest::RequestBuilder, key: Option<&str>) -> reqwest::RequestBuilder {
    match key {
        Some(key) => request.bearer_auth(key),
        None => request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_segments_are_encoded() {
        let client = UpstreamClient::new(ProxyConfig::with_upstream("https://sandbox.wompi.co/v1"));

        let url = client.url(&["transactions", "12/../x"]).unwrap();
        assert_eq!(url.as_str(), "https://sandbox.wompi.co/v1/transactions/12%2F..%2Fx");

        let url = client.url(&["pse", "financial_institutions"]).unwrap();
        assert_eq!(url.as_str(), "https://sandbox.wompi.co/v1/pse/financial_institutions");
    }
}
