//! Application State

use std::sync::Arc;

use crate::upstream::UpstreamClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Client for the payment gateway's REST API
    pub upstream: Arc<UpstreamClient>,
}
