//! Payment Methods
//!
//! The closed set of methods offered on the checkout page, with the labels
//! and input fields each one renders.

use serde::{Deserialize, Serialize};

/// Payment method offered by the gateway
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Card,
    Nequi,
    Pse,
    BancolombiaTransfer,
    BancolombiaCollect,
    Daviplata,
}

impl PaymentMethod {
    /// All methods, in display order
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Card,
        PaymentMethod::Nequi,
        PaymentMethod::Pse,
        PaymentMethod::BancolombiaTransfer,
        PaymentMethod::BancolombiaCollect,
        PaymentMethod::Daviplata,
    ];

    /// Wire code, as sent in `payment_method_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Nequi => "NEQUI",
            PaymentMethod::Pse => "PSE",
            PaymentMethod::BancolombiaTransfer => "BANCOLOMBIA_TRANSFER",
            PaymentMethod::BancolombiaCollect => "BANCOLOMBIA_COLLECT",
            PaymentMethod::Daviplata => "DAVIPLATA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Tarjeta de Crédito/Débito",
            PaymentMethod::Nequi => "Nequi",
            PaymentMethod::Pse => "PSE",
            PaymentMethod::BancolombiaTransfer => "Transferencia Bancolombia",
            PaymentMethod::BancolombiaCollect => "Pago en Corresponsal Bancolombia",
            PaymentMethod::Daviplata => "Daviplata",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "💳",
            PaymentMethod::Nequi => "📱",
            PaymentMethod::Pse => "🏦",
            PaymentMethod::BancolombiaTransfer => "🏧",
            PaymentMethod::BancolombiaCollect => "💰",
            PaymentMethod::Daviplata => "📲",
        }
    }

    /// Input fields the payer has to fill for this method
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            PaymentMethod::Card => &["number", "cvc", "exp_month", "exp_year", "installments"],
            PaymentMethod::Nequi | PaymentMethod::Daviplata => &["phone_number"],
            PaymentMethod::Pse => &["bank", "document_type", "document_number"],
            PaymentMethod::BancolombiaTransfer | PaymentMethod::BancolombiaCollect => &[],
        }
    }

    /// Whether the method also collects name, email and phone of the payer
    pub fn collects_customer_data(&self) -> bool {
        matches!(self, PaymentMethod::Pse)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_wire_code() {
        let json = serde_json::to_string(&PaymentMethod::BancolombiaTransfer).unwrap();
        assert_eq!(json, "\"BANCOLOMBIA_TRANSFER\"");
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(PaymentMethod::Card.required_fields().len(), 5);
        assert_eq!(PaymentMethod::Daviplata.required_fields(), &["phone_number"]);
        assert!(PaymentMethod::BancolombiaCollect.required_fields().is_empty());
        assert!(PaymentMethod::Pse.collects_customer_data());
        assert!(!PaymentMethod::Nequi.collects_customer_data());
    }
}
