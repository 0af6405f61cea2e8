//! Proxy Configuration

use crate::error::{ProxyError, Result};

pub const DEFAULT_UPSTREAM_URL: &str = "https://sandbox.wompi.co/v1";

/// Proxy settings, read from the environment
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    /// Gateway REST API the proxy forwards to
    pub upstream_url: String,

    /// Merchant private key, sent on transaction calls
    pub private_key: Option<String>,

    /// Merchant public key, sent on catalogue calls
    pub public_key: Option<String>,

    /// Listen address
    pub bind_addr: String,

    /// Directory holding the built WASM frontend
    pub static_dir: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.into(),
            private_key: None,
            public_key: None,
            bind_addr: "0.0.0.0:5000".into(),
            static_dir: "static".into(),
        }
    }
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let upstream_url = std::env::var("GATEWAY_API_URL")
            .unwrap_or(defaults.upstream_url)
            .trim_end_matches('/')
            .to_string();

        reqwest::Url::parse(&upstream_url)
            .map_err(|e| ProxyError::Config(format!("GATEWAY_API_URL is not a URL: {e}")))?;

        Ok(Self {
            upstream_url,
            private_key: non_empty_var("GATEWAY_PRIVATE_KEY"),
            public_key: non_empty_var("GATEWAY_PUBLIC_KEY"),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: std::env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
        })
    }

    pub fn with_upstream(upstream_url: impl Into<String>) -> Self {
        Self {
            upstream_url: upstream_url.into(),
            ..Default::default()
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
