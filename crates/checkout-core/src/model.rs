//! Checkout Data Model
//!
//! Everything here lives only for one page view; nothing is persisted.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::method::PaymentMethod;

/// Value typed into a payment field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(i64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }

    /// Empty or whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Method-specific inputs keyed by field name
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentDetails(BTreeMap<String, FieldValue>);

impl PaymentDetails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values the page starts with before any method is picked
    pub fn initial() -> Self {
        let mut details = Self::new();
        details.set("installments", FieldValue::Number(1));
        details.set("document_type", "CC");
        details
    }

    /// Merge one key; no validation happens here
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Required fields of `method` that are absent or blank
    pub fn missing_fields(&self, method: PaymentMethod) -> Vec<&'static str> {
        method
            .required_fields()
            .iter()
            .copied()
            .filter(|name| self.get(name).is_none_or(FieldValue::is_blank))
            .collect()
    }
}

/// Payer identity, collected only when the method needs it
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerData {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
}

impl CustomerData {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty() && self.phone_number.is_empty() && self.email.is_empty()
    }

    pub fn set(&mut self, field: CustomerField, value: String) {
        match field {
            CustomerField::FullName => self.full_name = value,
            CustomerField::PhoneNumber => self.phone_number = value,
            CustomerField::Email => self.email = value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerField {
    FullName,
    PhoneNumber,
    Email,
}

/// The two checkboxes the payer must tick before paying
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentState {
    /// Terms of service and privacy policy
    pub terms: bool,

    /// Authorization to process personal data
    pub personal_data: bool,
}

impl ConsentState {
    pub fn is_complete(&self) -> bool {
        self.terms && self.personal_data
    }
}

/// Bank offered in the PSE selector
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialInstitution {
    pub financial_institution_code: String,
    pub financial_institution_name: String,
}

/// Checkout currency
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    COP,
    USD,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::COP, Currency::USD];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::COP => "COP",
            Currency::USD => "USD",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Currency::COP => "Peso Colombiano (COP)",
            Currency::USD => "Dólar Estadounidense (USD)",
        }
    }

    /// Parse a currency code; anything unknown falls back to COP
    pub fn from_code(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "USD" => Currency::USD,
            _ => Currency::COP,
        }
    }
}

/// Tokens proving the payer accepted the gateway's terms
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceTokens {
    pub acceptance_token: String,
    pub accept_personal_auth: String,
}

impl AcceptanceTokens {
    pub fn new(acceptance_token: impl Into<String>, accept_personal_auth: impl Into<String>) -> Self {
        Self {
            acceptance_token: acceptance_token.into(),
            accept_personal_auth: accept_personal_auth.into(),
        }
    }
}

/// Placeholder tokens for sandbox use; production deployments pass the
/// tokens issued by the gateway's merchant endpoint to [`AcceptanceTokens::new`]
impl Default for AcceptanceTokens {
    fn default() -> Self {
        Self::new("eyJhbGciOiJIUzI1NiJ9...", "eyJhbGciOiJIUzI1NiJ9...")
    }
}

/// Raw gateway answer: HTTP status plus decoded body
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl GatewayResponse {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    /// The gateway signals an accepted payment with 201
    pub fn is_created(&self) -> bool {
        self.status == 201
    }
}

/// Create-payment response kept for display only
pub type TransactionResult = GatewayResponse;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Toast shown to the payer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Assigned when the toast is queued; stable while it is shown
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { id: 0, level: NotificationLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { id: 0, level: NotificationLevel::Error, message: message.into() }
    }
}

/// Amount typed into the amount field
///
/// An empty field means zero. Text that is not a number yet (`"1."`, `"-"`)
/// gives `None` so the caller keeps the previous amount and the raw text.
pub fn amount_from_input(input: &str) -> Option<Decimal> {
    let input = input.trim();
    if input.is_empty() {
        return Some(Decimal::ZERO);
    }
    input.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_details() {
        let details = PaymentDetails::initial();
        assert_eq!(details.get("installments"), Some(&FieldValue::Number(1)));
        assert_eq!(details.text("document_type"), Some("CC"));
    }

    #[test]
    fn test_missing_fields() {
        let mut details = PaymentDetails::new();
        details.set("phone_number", "   ");
        assert_eq!(details.missing_fields(PaymentMethod::Nequi), vec!["phone_number"]);

        details.set("phone_number", "3001234567");
        assert!(details.missing_fields(PaymentMethod::Nequi).is_empty());
        assert!(details.missing_fields(PaymentMethod::BancolombiaTransfer).is_empty());
        assert_eq!(details.missing_fields(PaymentMethod::Pse).len(), 3);
    }

    #[test]
    fn test_field_value_untagged() {
        let details: PaymentDetails =
            serde_json::from_str(r#"{"number":"4242","installments":2}"#).unwrap();
        assert_eq!(details.text("number"), Some("4242"));
        assert_eq!(details.get("installments"), Some(&FieldValue::Number(2)));
    }

    #[test]
    fn test_consent() {
        let mut consent = ConsentState::default();
        assert!(!consent.is_complete());
        consent.terms = true;
        assert!(!consent.is_complete());
        consent.personal_data = true;
        assert!(consent.is_complete());
    }

    #[test]
    fn test_gateway_response_status() {
        let created = GatewayResponse::new(201, serde_json::json!({}));
        assert!(created.is_created());

        let ok = GatewayResponse::new(200, serde_json::json!({}));
        assert!(!ok.is_created());
    }

    #[test]
    fn test_amount_from_input_keeps_decimals() {
        assert_eq!(amount_from_input("25000.50"), Some(Decimal::new(2_500_050, 2)));
        assert_eq!(amount_from_input(" 12 "), Some(Decimal::from(12)));
        assert_eq!(amount_from_input("0.99"), Some(Decimal::new(99, 2)));
    }

    #[test]
    fn test_amount_from_input_partial_text() {
        assert_eq!(amount_from_input(""), Some(Decimal::ZERO));
        assert_eq!(amount_from_input("abc"), None);
        assert_eq!(amount_from_input("-"), None);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("usd"), Currency::USD);
        assert_eq!(Currency::from_code("EUR"), Currency::COP);
    }
}
