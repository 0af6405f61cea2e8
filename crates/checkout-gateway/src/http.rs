//! HTTP Gateway
//!
//! reqwest client for the `/api/payments` proxy. Works natively and in the
//! browser (reqwest's wasm backend).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use checkout_core::{
    CheckoutError, CreatePaymentRequest, FinancialInstitution, GatewayResponse, PaymentGateway,
    Result,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/payments";

/// Gateway adapter configuration
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Base path of the payments API, without trailing slash
    pub base_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.into() }
    }
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    /// Reads `CHECKOUT_API_URL`, falling back to the local proxy
    pub fn from_env() -> Self {
        std::env::var("CHECKOUT_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map_or_else(Self::default, Self::new)
    }

    /// Payments API served by the same origin as the page
    pub fn for_origin(origin: &str) -> Self {
        Self::new(format!("{}/api/payments", origin.trim_end_matches('/')))
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Bank list as sent by the proxy: either bare or wrapped in `data`
#[derive(Deserialize)]
#[serde(untagged)]
enum InstitutionList {
    Wrapped { data: Vec<FinancialInstitution> },
    Bare(Vec<FinancialInstitution>),
}

impl InstitutionList {
    fn into_vec(self) -> Vec<FinancialInstitution> {
        match self {
            InstitutionList::Wrapped { data } | InstitutionList::Bare(data) => data,
        }
    }
}

/// Payments API client
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_config(GatewayConfig::new(base_url))
    }

    pub fn from_config(config: GatewayConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_config(GatewayConfig::from_env())
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Status plus body; a body that is not JSON is kept as a JSON string
    async fn into_gateway_response(response: reqwest::Response) -> Result<GatewayResponse> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| CheckoutError::Transport(e.to_string()))?;

        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        };

        Ok(GatewayResponse::new(status, body))
    }

    async fn post_json<T: serde::Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<GatewayResponse> {
        let url = self.config.endpoint(path);

        let response = self.client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(%url, "Payments API unreachable: {}", e);
                CheckoutError::Transport(e.to_string())
            })?;

        Self::into_gateway_response(response).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PaymentGateway for HttpGateway {
    async fn create_payment(&self, request: &CreatePaymentRequest) -> Result<GatewayResponse> {
        let response = self.post_json("create", request).await?;
        tracing::info!(
            status = response.status,
            method = %request.payment_method_type,
            "Create payment answered"
        );
        Ok(response)
    }

    async fn verify_payment(&self, transaction_id: &str) -> Result<GatewayResponse> {
        self.post_json("verify", &json!({ "transactionId": transaction_id })).await
    }

    async fn list_financial_institutions(&self) -> Result<Vec<FinancialInstitution>> {
        let url = self.config.endpoint("pse/financial-institutions");

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Error obteniendo instituciones financieras: {}", e);
                CheckoutError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Error obteniendo instituciones financieras");
            return Err(CheckoutError::Gateway { status: status.as_u16() });
        }

        let list: InstitutionList = response
            .json()
            .await
            .map_err(|e| CheckoutError::Decode(e.to_string()))?;

        Ok(list.into_vec())
    }

    fn name(&self) -> &str {
        "http"
    }
}
