//! Mock Gateway
//!
//! For tests and demos. Records every call and answers with scripted
//! responses.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use super::PaymentGateway;
use crate::error::{CheckoutError, Result};
use crate::model::{FinancialInstitution, GatewayResponse};
use crate::payload::CreatePaymentRequest;

/// A call received by [`MockGateway`]
#[derive(Clone, Debug, PartialEq)]
pub enum GatewayCall {
    /// Serialized create-payment body
    CreatePayment(serde_json::Value),
    VerifyPayment(String),
    ListFinancialInstitutions,
}

/// In-memory gateway with scripted answers
pub struct MockGateway {
    calls: Mutex<Vec<GatewayCall>>,
    payment_responses: Mutex<VecDeque<Result<GatewayResponse>>>,
    institutions: Mutex<Result<Vec<FinancialInstitution>>>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            payment_responses: Mutex::new(VecDeque::new()),
            institutions: Mutex::new(Ok(Self::sample_institutions())),
        }
    }

    /// A couple of PSE test banks
    pub fn sample_institutions() -> Vec<FinancialInstitution> {
        vec![
            FinancialInstitution {
                financial_institution_code: "1".into(),
                financial_institution_name: "Banco que aprueba".into(),
            },
            FinancialInstitution {
                financial_institution_code: "2".into(),
                financial_institution_name: "Banco que rechaza".into(),
            },
        ]
    }

    /// Queue the answer for the next create/verify call
    pub fn push_response(&self, response: Result<GatewayResponse>) -> &Self {
        lock(&self.payment_responses).push_back(response);
        self
    }

    /// Answer every bank-list request with `result`
    pub fn set_institutions(&self, result: Result<Vec<FinancialInstitution>>) -> &Self {
        *lock(&self.institutions) = result;
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        lock(&self.calls).clone()
    }

    pub fn count(&self, matches: impl Fn(&GatewayCall) -> bool) -> usize {
        lock(&self.calls).iter().filter(|c| matches(c)).count()
    }

    fn record(&self, call: GatewayCall) {
        lock(&self.calls).push(call);
    }

    /// Scripted answer, or a created transaction when nothing is queued
    fn next_response(&self) -> Result<GatewayResponse> {
        lock(&self.payment_responses).pop_front().unwrap_or_else(|| {
            Ok(GatewayResponse::new(
                201,
                json!({ "data": { "id": "mock-transaction", "status": "PENDING" } }),
            ))
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PaymentGateway for MockGateway {
    async fn create_payment(&self, request: &CreatePaymentRequest) -> Result<GatewayResponse> {
        self.record(GatewayCall::CreatePayment(serde_json::to_value(request)?));
        self.next_response()
    }

    async fn verify_payment(&self, transaction_id: &str) -> Result<GatewayResponse> {
        self.record(GatewayCall::VerifyPayment(transaction_id.to_string()));
        self.next_response()
    }

    async fn list_financial_institutions(&self) -> Result<Vec<FinancialInstitution>> {
        self.record(GatewayCall::ListFinancialInstitutions);
        match &*lock(&self.institutions) {
            Ok(list) => Ok(list.clone()),
            Err(e) => Err(e.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// a poisoned lock only means another test thread panicked
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
