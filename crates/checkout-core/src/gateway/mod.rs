//! Gateway Abstraction
//!
//! The checkout page talks to the payment gateway through this trait only.
//! `checkout-gateway` implements it over HTTP; [`MockGateway`] scripts it in
//! memory.

mod mock;

pub use mock::{GatewayCall, MockGateway};

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{FinancialInstitution, GatewayResponse};
use crate::payload::CreatePaymentRequest;

/// Payment gateway client (Strategy pattern)
///
/// Every operation is one request: no retries, no caching. A non-2xx answer
/// to create/verify is still `Ok`; the caller inspects the status. `Err` means
/// the request could not be completed at all.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PaymentGateway {
    /// `POST {base}/create`
    async fn create_payment(&self, request: &CreatePaymentRequest) -> Result<GatewayResponse>;

    /// `POST {base}/verify` with `{"transactionId": ...}`
    async fn verify_payment(&self, transaction_id: &str) -> Result<GatewayResponse>;

    /// `GET {base}/pse/financial-institutions`
    async fn list_financial_institutions(&self) -> Result<Vec<FinancialInstitution>>;

    /// Gateway name, for logs
    fn name(&self) -> &str;
}
