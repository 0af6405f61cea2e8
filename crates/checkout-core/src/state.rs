//! Checkout State
//!
//! The whole form lives in one serializable [`CheckoutState`]. Every user
//! event and every gateway outcome is an [`Action`]; [`update`] applies it and
//! returns the [`Effect`]s the caller has to run. The state never talks to the
//! network itself.
//!
//! A single submission moves through:
//!
//! ```text
//! Idle ──submit──▶ consent? ──no──▶ Idle (error toast, no request)
//!                     │
//!                    yes
//!                     ▼
//!                Submitting ──201──▶ Succeeded (result shown)
//!                     │
//!                     └──other status / transport error──▶ Idle (error toast)
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CheckoutError;
use crate::method::PaymentMethod;
use crate::model::{
    AcceptanceTokens, ConsentState, Currency, CustomerData, CustomerField, FieldValue,
    FinancialInstitution, GatewayResponse, Notification, PaymentDetails, TransactionResult,
};
use crate::payload::CreatePaymentRequest;

pub const MSG_CONSENT_REQUIRED: &str = "Debes aceptar los términos y condiciones";
pub const MSG_PAYMENT_SUCCEEDED: &str = "Pago realizado con éxito";
pub const MSG_PAYMENT_FAILED: &str = "Error al procesar el pago";
pub const MSG_BANKS_FAILED: &str = "Error cargando bancos";

/// Toasts kept on screen at once; older ones are dropped first
pub const MAX_NOTIFICATIONS: usize = 3;

/// Where the current submission attempt stands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

/// Everything the checkout page shows
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckoutState {
    pub amount: Decimal,
    pub currency: Currency,
    pub method: PaymentMethod,
    pub details: PaymentDetails,
    pub customer: CustomerData,
    pub consent: ConsentState,

    /// Options of the PSE bank selector
    pub institutions: Vec<FinancialInstitution>,

    pub phase: SubmissionPhase,

    /// Last accepted create-payment response
    pub result: Option<TransactionResult>,

    /// Pending toasts, oldest first
    pub notifications: Vec<Notification>,

    /// Id handed to the next queued toast
    #[serde(default)]
    pub next_notification_id: u64,

    pub tokens: AcceptanceTokens,
}

impl Default for CheckoutState {
    fn default() -> Self {
        Self::new(AcceptanceTokens::default())
    }
}

impl CheckoutState {
    pub fn new(tokens: AcceptanceTokens) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency: Currency::default(),
            method: PaymentMethod::default(),
            details: PaymentDetails::initial(),
            customer: CustomerData::default(),
            consent: ConsentState::default(),
            institutions: Vec::new(),
            phase: SubmissionPhase::Idle,
            result: None,
            notifications: Vec::new(),
            next_notification_id: 1,
            tokens,
        }
    }

    /// A request is in flight; the submit button is disabled
    pub fn is_busy(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// Required fields of the active method still empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.details.missing_fields(self.method)
    }

    /// Request body a submit at `requested_at` would send
    pub fn payment_request(&self, requested_at: DateTime<Utc>) -> CreatePaymentRequest {
        CreatePaymentRequest::build(
            self.amount,
            self.currency,
            self.method,
            &self.details,
            &self.customer,
            &self.tokens,
            requested_at,
        )
    }

    fn notify(&mut self, mut notification: Notification) {
        notification.id = self.next_notification_id;
        self.next_notification_id += 1;

        if self.notifications.len() >= MAX_NOTIFICATIONS {
            let overflow = self.notifications.len() + 1 - MAX_NOTIFICATIONS;
            self.notifications.drain(..overflow);
        }
        self.notifications.push(notification);
    }
}

/// User events and gateway outcomes
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SelectMethod(PaymentMethod),
    UpdateField { name: String, value: FieldValue },
    UpdateCustomer { field: CustomerField, value: String },
    SetAmount(Decimal),
    SetCurrency(Currency),
    ToggleTerms,
    TogglePersonalData,
    Submit { requested_at: DateTime<Utc> },
    PaymentResponded(GatewayResponse),
    PaymentFailed(CheckoutError),
    InstitutionsLoaded(Vec<FinancialInstitution>),
    InstitutionsFailed(CheckoutError),
    /// Remove the toast with this id; unknown ids are ignored
    DismissNotification(u64),
}

impl Action {
    pub fn update_field(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Action::UpdateField { name: name.into(), value: value.into() }
    }

    pub fn submit_now() -> Self {
        Action::Submit { requested_at: Utc::now() }
    }
}

/// Side effects requested by [`update`]
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch the PSE bank list
    LoadInstitutions,

    /// Send the payment to the gateway
    CreatePayment(CreatePaymentRequest),
}

/// Apply one action to the state
pub fn update(state: &mut CheckoutState, action: Action) -> Vec<Effect> {
    match action {
        Action::SelectMethod(method) => {
            tracing::debug!(method = %method, "Payment method selected");
            state.method = method;
            state.details.clear();

            if method == PaymentMethod::Pse {
                // refreshed on every selection, never deduplicated
                state.institutions.clear();
                return vec![Effect::LoadInstitutions];
            }
        }

        Action::UpdateField { name, value } => state.details.set(name, value),

        Action::UpdateCustomer { field, value } => state.customer.set(field, value),

        Action::SetAmount(amount) => state.amount = amount,

        Action::SetCurrency(currency) => state.currency = currency,

        Action::ToggleTerms => state.consent.terms = !state.consent.terms,

        Action::TogglePersonalData => {
            state.consent.personal_data = !state.consent.personal_data;
        }

        Action::Submit { requested_at } => {
            if state.is_busy() {
                tracing::debug!("Submit ignored, payment already in flight");
                return Vec::new();
            }

            if !state.consent.is_complete() {
                state.notify(Notification::error(MSG_CONSENT_REQUIRED));
                return Vec::new();
            }

            let missing = state.missing_fields();
            if !missing.is_empty() {
                tracing::debug!(?missing, "Submitting with empty required fields");
            }

            state.phase = SubmissionPhase::Submitting;
            state.result = None;
            return vec![Effect::CreatePayment(state.payment_request(requested_at))];
        }

        Action::PaymentResponded(response) => {
            if response.is_created() {
                tracing::info!(status = response.status, "Payment accepted by gateway");
                state.phase = SubmissionPhase::Succeeded;
                state.result = Some(response);
                state.notify(Notification::success(MSG_PAYMENT_SUCCEEDED));
            } else {
                tracing::warn!(status = response.status, "Payment rejected by gateway");
                state.phase = SubmissionPhase::Idle;
                state.notify(Notification::error(MSG_PAYMENT_FAILED));
            }
        }

        Action::PaymentFailed(err) => {
            tracing::error!(status = ?err.status(), "Error al procesar el pago: {}", err);
            state.phase = SubmissionPhase::Idle;
            state.notify(Notification::error(err.user_message()));
        }

        Action::InstitutionsLoaded(institutions) => {
            tracing::debug!(count = institutions.len(), "PSE banks loaded");
            state.institutions = institutions;
        }

        Action::InstitutionsFailed(err) => {
            tracing::warn!(status = ?err.status(), "Error cargando bancos: {}", err);
            state.institutions.clear();
            state.notify(Notification::error(MSG_BANKS_FAILED));
        }

        Action::DismissNotification(id) => state.notifications.retain(|n| n.id != id),
    }

    Vec::new()
}
