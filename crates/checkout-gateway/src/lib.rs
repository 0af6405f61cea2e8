//! # checkout-gateway
//!
//! HTTP implementation of [`checkout_core::PaymentGateway`] for the payments
//! proxy the checkout page sits behind.
//!
//! ## Endpoints
//!
//! - `POST {base}/create`: create a payment
//! - `POST {base}/verify`: look up a transaction
//! - `GET  {base}/pse/financial-institutions`: PSE bank list
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_gateway::HttpGateway;
//!
//! let gateway = HttpGateway::from_env();
//! let banks = gateway.list_financial_institutions().await?;
//! ```

pub mod http;

pub use http::{GatewayConfig, HttpGateway};

// Re-export core types for convenience
pub use checkout_core::{
    CheckoutError, CreatePaymentRequest, FinancialInstitution, GatewayResponse, PaymentGateway,
    Result,
};
