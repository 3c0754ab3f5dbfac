use rust_decimal::Decimal;
use thiserror::Error;

/// Numeric text entered by a user could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not parse {field}: '{text}' is not a number")]
pub struct ParseError {
    pub field: String,
    pub text: String,
}

/// A calculation input or a caller-level business rule was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("down payment cannot be greater than or equal to the total price ({down_payment} >= {price})")]
    DownPaymentExceedsPrice { down_payment: Decimal, price: Decimal },

    #[error("{field} is out of range: {value} (expected {min} to {max})")]
    OutOfRange {
        field: String,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("Unrecognized payment frequency: '{0}' (expected monthly, quarterly, semi-annual or annual)")]
    UnrecognizedFrequency(String),
}

#[derive(Debug, Error)]
pub enum PricingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PricingError {
    fn from(e: serde_json::Error) -> Self {
        PricingError::SerializationError(e.to_string())
    }
}

impl PricingError {
    /// The validation failure behind this error, if any.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            PricingError::Validation(v) => Some(v),
            _ => None,
        }
    }
}
