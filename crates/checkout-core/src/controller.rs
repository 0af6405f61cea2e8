//! Checkout Controller
//!
//! Drives [`update`] against a [`PaymentGateway`]: each effect is executed and
//! its outcome fed back as an action until nothing is left to do. Gateway and
//! transport failures end up as notifications in the state, never as errors
//! returned to the caller.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::gateway::PaymentGateway;
use crate::method::PaymentMethod;
use crate::model::{AcceptanceTokens, Currency, CustomerField, FieldValue, GatewayResponse};
use crate::state::{Action, CheckoutState, Effect, update};

/// Run one effect and turn its outcome into the action that reports it
pub async fn run_effect<G>(gateway: &G, effect: Effect) -> Action
where
    G: PaymentGateway + ?Sized,
{
    match effect {
        Effect::LoadInstitutions => match gateway.list_financial_institutions().await {
            Ok(list) => Action::InstitutionsLoaded(list),
            Err(e) => Action::InstitutionsFailed(e),
        },
        Effect::CreatePayment(request) => match gateway.create_payment(&request).await {
            Ok(response) => Action::PaymentResponded(response),
            Err(e) => Action::PaymentFailed(e),
        },
    }
}

/// Checkout form bound to a gateway
pub struct CheckoutController<G: PaymentGateway> {
    gateway: G,
    state: CheckoutState,
}

impl<G: PaymentGateway> CheckoutController<G> {
    pub fn new(gateway: G, tokens: AcceptanceTokens) -> Self {
        Self::with_state(gateway, CheckoutState::new(tokens))
    }

    pub fn with_state(gateway: G, state: CheckoutState) -> Self {
        Self { gateway, state }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Apply an action and run every effect it leads to
    pub async fn dispatch(&mut self, action: Action) {
        let mut pending: VecDeque<Effect> = update(&mut self.state, action).into();

        while let Some(effect) = pending.pop_front() {
            tracing::debug!(gateway = self.gateway.name(), ?effect, "Running effect");
            let outcome = run_effect(&self.gateway, effect).await;
            pending.extend(update(&mut self.state, outcome));
        }
    }

    pub async fn select_method(&mut self, method: PaymentMethod) {
        self.dispatch(Action::SelectMethod(method)).await;
    }

    pub async fn update_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.dispatch(Action::update_field(name, value)).await;
    }

    pub async fn update_customer(&mut self, field: CustomerField, value: impl Into<String>) {
        self.dispatch(Action::UpdateCustomer { field, value: value.into() }).await;
    }

    pub async fn set_amount(&mut self, amount: Decimal) {
        self.dispatch(Action::SetAmount(amount)).await;
    }

    pub async fn set_currency(&mut self, currency: Currency) {
        self.dispatch(Action::SetCurrency(currency)).await;
    }

    pub async fn toggle_terms(&mut self) {
        self.dispatch(Action::ToggleTerms).await;
    }

    pub async fn toggle_personal_data(&mut self) {
        self.dispatch(Action::TogglePersonalData).await;
    }

    pub async fn submit(&mut self) {
        self.submit_at(Utc::now()).await;
    }

    pub async fn submit_at(&mut self, requested_at: DateTime<Utc>) {
        self.dispatch(Action::Submit { requested_at }).await;
    }

    pub async fn dismiss_notification(&mut self, id: u64) {
        self.dispatch(Action::DismissNotification(id)).await;
    }

    /// Look up a transaction; not part of the form flow
    pub async fn verify_payment(&self, transaction_id: &str) -> Result<GatewayResponse> {
        self.gateway.verify_payment(transaction_id).await
    }
}
