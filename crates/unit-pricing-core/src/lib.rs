pub mod error;
pub mod format;
pub mod parse;
pub mod types;

#[cfg(feature = "installment")]
pub mod config;

#[cfg(feature = "installment")]
pub mod installment;

#[cfg(feature = "installment")]
pub mod record;

pub use error::{ParseError, PricingError, ValidationError};
pub use types::*;

/// Standard result type for all unit-pricing operations
pub type PricingResult<T> = Result<T, PricingError>;
