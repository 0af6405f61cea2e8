//! API Client

use checkout_gateway::{GatewayConfig, HttpGateway};

/// Gateway for the payments API served next to this page
pub fn gateway() -> HttpGateway {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:5000".into());

    HttpGateway::from_config(GatewayConfig::for_origin(&origin))
}
