//! Gateway Request Payloads
//!
//! Projects the form state onto the create-payment schema. Each method has
//! its own field struct; the method decides which one is built.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::method::PaymentMethod;
use crate::model::{AcceptanceTokens, CustomerData, Currency, FieldValue, PaymentDetails};

/// PSE payer type for a natural person
pub const PSE_NATURAL_PERSON: u8 = 0;

/// Body of `POST {base}/create`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreatePaymentRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: Currency,
    pub payment_method_type: PaymentMethod,
    pub payment_method: PaymentMethodPayload,
    pub acceptance_token: String,
    pub accept_personal_auth: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_data: Option<CustomerContact>,
}

impl CreatePaymentRequest {
    /// Assemble the request for `method` from what the payer typed
    pub fn build(
        amount: Decimal,
        currency: Currency,
        method: PaymentMethod,
        details: &PaymentDetails,
        customer: &CustomerData,
        tokens: &AcceptanceTokens,
        requested_at: DateTime<Utc>,
    ) -> Self {
        let with_customer = method.collects_customer_data() && !customer.is_empty();

        Self {
            amount,
            currency,
            payment_method_type: method,
            payment_method: PaymentMethodPayload::project(method, details, requested_at),
            acceptance_token: tokens.acceptance_token.clone(),
            accept_personal_auth: tokens.accept_personal_auth.clone(),
            customer_email: (with_customer && !customer.email.is_empty())
                .then(|| customer.email.clone()),
            customer_data: with_customer.then(|| CustomerContact {
                full_name: customer.full_name.clone(),
                phone_number: customer.phone_number.clone(),
            }),
        }
    }
}

/// Contact block sent alongside PSE payments
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CustomerContact {
    pub full_name: String,
    pub phone_number: String,
}

/// The `payment_method` object: `type` plus the method's own fields
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentMethodPayload {
    #[serde(rename = "type")]
    pub kind: PaymentMethod,
    #[serde(flatten)]
    pub fields: MethodFields,
}

impl PaymentMethodPayload {
    pub fn project(method: PaymentMethod, details: &PaymentDetails, requested_at: DateTime<Utc>) -> Self {
        let fields = match method {
            PaymentMethod::Card => MethodFields::Card(CardFields::from_details(details)),
            PaymentMethod::Nequi | PaymentMethod::Daviplata => {
                MethodFields::Wallet(WalletFields::from_details(details))
            }
            PaymentMethod::Pse => MethodFields::Pse(PseFields::from_details(details, requested_at)),
            PaymentMethod::BancolombiaTransfer | PaymentMethod::BancolombiaCollect => {
                MethodFields::None(NoFields {})
            }
        };

        Self { kind: method, fields }
    }
}

/// Method-specific part of `payment_method`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MethodFields {
    Card(CardFields),
    Pse(PseFields),
    Wallet(WalletFields),
    None(NoFields),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CardFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvc: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_month: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_year: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments: Option<FieldValue>,
}

impl CardFields {
    fn from_details(details: &PaymentDetails) -> Self {
        Self {
            number: details.get("number").cloned(),
            cvc: details.get("cvc").cloned(),
            exp_month: details.get("exp_month").cloned(),
            exp_year: details.get("exp_year").cloned(),
            installments: details.get("installments").cloned(),
        }
    }
}

/// Nequi and Daviplata only need the wallet's phone number
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WalletFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<FieldValue>,
}

impl WalletFields {
    fn from_details(details: &PaymentDetails) -> Self {
        Self { phone_number: details.get("phone_number").cloned() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PseFields {
    pub user_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_legal_id_type: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_legal_id: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_institution_code: Option<FieldValue>,
    pub payment_description: String,
}

impl PseFields {
    fn from_details(details: &PaymentDetails, requested_at: DateTime<Utc>) -> Self {
        Self {
            // always a natural person; the form has no company option
            user_type: PSE_NATURAL_PERSON,
            user_legal_id_type: details.get("document_type").cloned(),
            user_legal_id: details.get("document_number").cloned(),
            financial_institution_code: details.get("bank").cloned(),
            payment_description: format!("Pago ref: {}", requested_at.timestamp_millis()),
        }
    }
}

/// Bancolombia transfer and collect send nothing beyond `type`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NoFields {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_123).unwrap()
    }

    fn method_json(method: PaymentMethod, details: &PaymentDetails) -> serde_json::Value {
        serde_json::to_value(PaymentMethodPayload::project(method, details, at())).unwrap()
    }

    #[test]
    fn test_card_projection() {
        let mut details = PaymentDetails::new();
        details.set("number", "4242424242424242");
        details.set("cvc", "123");
        details.set("exp_month", "12");
        details.set("exp_year", "29");
        details.set("installments", 2_i64);
        details.set("phone_number", "stale");

        assert_eq!(
            method_json(PaymentMethod::Card, &details),
            json!({
                "type": "CARD",
                "number": "4242424242424242",
                "cvc": "123",
                "exp_month": "12",
                "exp_year": "29",
                "installments": 2,
            })
        );
    }

    #[test]
    fn test_wallet_projection() {
        let mut details = PaymentDetails::new();
        details.set("phone_number", "3991111111");

        for method in [PaymentMethod::Nequi, PaymentMethod::Daviplata] {
            let value = method_json(method, &details);
            assert_eq!(value["phone_number"], "3991111111");
            assert_eq!(value["type"], method.as_str());
            assert_eq!(value.as_object().unwrap().len(), 2);
        }
    }

    #[test]
    fn test_pse_projection() {
        let mut details = PaymentDetails::new();
        details.set("bank", "1022");
        details.set("document_type", "NIT");
        details.set("document_number", "900123456");
        details.set("user_type", 1_i64);

        assert_eq!(
            method_json(PaymentMethod::Pse, &details),
            json!({
                "type": "PSE",
                "user_type": 0,
                "user_legal_id_type": "NIT",
                "user_legal_id": "900123456",
                "financial_institution_code": "1022",
                "payment_description": "Pago ref: 1700000000123",
            })
        );
    }

    #[test]
    fn test_bancolombia_projection_is_type_only() {
        let mut details = PaymentDetails::new();
        details.set("number", "4242");

        for method in [PaymentMethod::BancolombiaTransfer, PaymentMethod::BancolombiaCollect] {
            assert_eq!(method_json(method, &details), json!({ "type": method.as_str() }));
        }
    }

    #[test]
    fn test_missing_details_are_omitted() {
        let value = method_json(PaymentMethod::Card, &PaymentDetails::new());
        assert_eq!(value, json!({ "type": "CARD" }));
    }

    #[test]
    fn test_request_top_level_fields() {
        let request = CreatePaymentRequest::build(
            dec!(25000.50),
            Currency::COP,
            PaymentMethod::Nequi,
            &PaymentDetails::new(),
            &CustomerData::default(),
            &AcceptanceTokens::new("acc", "auth"),
            at(),
        );
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["amount"], json!(25000.5));
        assert_eq!(value["currency"], "COP");
        assert_eq!(value["payment_method_type"], "NEQUI");
        assert_eq!(value["acceptance_token"], "acc");
        assert_eq!(value["accept_personal_auth"], "auth");
        assert!(value.get("customer_data").is_none());
    }

    #[test]
    fn test_customer_data_only_for_pse() {
        let customer = CustomerData {
            full_name: "Ana Pérez".into(),
            phone_number: "3001234567".into(),
            email: "ana@example.com".into(),
        };
        let tokens = AcceptanceTokens::default();
        let details = PaymentDetails::new();

        let pse = CreatePaymentRequest::build(
            dec!(1000), Currency::COP, PaymentMethod::Pse, &details, &customer, &tokens, at(),
        );
        assert_eq!(pse.customer_email.as_deref(), Some("ana@example.com"));
        assert_eq!(pse.customer_data.unwrap().full_name, "Ana Pérez");

        let card = CreatePaymentRequest::build(
            dec!(1000), Currency::COP, PaymentMethod::Card, &details, &customer, &tokens, at(),
        );
        assert!(card.customer_email.is_none());
        assert!(card.customer_data.is_none());
    }
}
