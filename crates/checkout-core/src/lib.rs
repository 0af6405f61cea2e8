//! # checkout-core
//!
//! Checkout form state and payment-gateway abstraction for a Wompi-style
//! Colombian gateway.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     CheckoutController                        │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐  │
//! │  │   update()   │──▶│   Effects    │──▶│  PaymentGateway  │  │
//! │  │  (reducer)   │◀──│   Actions    │◀──│    (Strategy)    │  │
//! │  └──────────────┘   └──────────────┘   └──────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reducer is pure: the Leptos page and [`CheckoutController`] both feed
//! it actions and run the effects it returns. The `PaymentGateway` trait lets
//! the HTTP adapter be swapped for [`MockGateway`] in tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_core::{AcceptanceTokens, CheckoutController, PaymentMethod};
//!
//! let mut checkout = CheckoutController::new(gateway, AcceptanceTokens::default());
//! checkout.toggle_terms().await;
//! checkout.toggle_personal_data().await;
//! checkout.select_method(PaymentMethod::Nequi).await;
//! checkout.update_field("phone_number", "3991111111").await;
//! checkout.submit().await;
//! ```

pub mod controller;
pub mod error;
pub mod gateway;
pub mod method;
pub mod model;
pub mod payload;
pub mod state;

pub use controller::{CheckoutController, run_effect};
pub use error::{CheckoutError, Result};
pub use gateway::{GatewayCall, MockGateway, PaymentGateway};
pub use method::PaymentMethod;
pub use model::{
    AcceptanceTokens, ConsentState, Currency, CustomerData, CustomerField, FieldValue,
    FinancialInstitution, GatewayResponse, Notification, NotificationLevel, PaymentDetails,
    TransactionResult, amount_from_input,
};
pub use payload::{CreatePaymentRequest, PaymentMethodPayload};
pub use state::{Action, CheckoutState, Effect, MAX_NOTIFICATIONS, SubmissionPhase, update};
