//! Error Types

use thiserror::Error;

use crate::state::MSG_PAYMENT_FAILED;

/// Result type alias for checkout operations
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Checkout error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Request never reached the gateway, or its response could not be read
    #[error("Transport error: {0}")]
    Transport(String),

    /// Gateway answered with a status the operation cannot use
    #[error("Gateway returned status {status}")]
    Gateway { status: u16 },

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request body could not be serialized
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for CheckoutError {
    fn from(err: serde_json::Error) -> Self {
        CheckoutError::Json(err.to_string())
    }
}

impl CheckoutError {
    /// Generic text shown to the payer; details stay in the logs
    pub fn user_message(&self) -> &'static str {
        match self {
            CheckoutError::Transport(_) | CheckoutError::Gateway { .. } | CheckoutError::Decode(_) => {
                MSG_PAYMENT_FAILED
            }
            CheckoutError::Json(_) => "No se pudo preparar el pago",
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            CheckoutError::Gateway { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_details() {
        let err = CheckoutError::Transport("connection refused".into());
        assert_eq!(err.user_message(), "Error al procesar el pago");
        assert!(!err.user_message().contains("refused"));
    }

    #[test]
    fn test_status() {
        assert_eq!(CheckoutError::Gateway { status: 503 }.status(), Some(503));
        assert_eq!(CheckoutError::Decode("x".into()).status(), None);
    }

    #[test]
    fn test_from_serde_json() {
        let err: CheckoutError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, CheckoutError::Json(_)));
    }
}
