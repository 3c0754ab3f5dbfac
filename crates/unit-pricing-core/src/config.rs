//! Calculator defaults, passed explicitly to whoever builds inputs.

use serde::{Deserialize, Serialize};

use crate::installment::{
    CalculationInput, DownPaymentBasis, PaymentFrequency, ValidationPolicy,
    DEFAULT_INSTALLMENT_YEARS,
};
use crate::types::{Currency, Money};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Term used when the caller does not supply one.
    pub default_installment_years: i32,
    pub default_frequency: PaymentFrequency,
    pub policy: ValidationPolicy,
    pub down_payment_basis: DownPaymentBasis,
    /// Suffix for formatted amounts.
    pub currency: Currency,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_installment_years: DEFAULT_INSTALLMENT_YEARS,
            default_frequency: PaymentFrequency::default(),
            policy: ValidationPolicy::default(),
            down_payment_basis: DownPaymentBasis::default(),
            currency: Currency::default(),
        }
    }
}

impl CalculatorConfig {
    /// An input for `total_price` with every other field at its configured default.
    pub fn input(&self, total_price: Money) -> CalculationInput {
        CalculationInput {
            installment_years: self.default_installment_years,
            payment_frequency: self.default_frequency,
            policy: self.policy,
            ..CalculationInput::new(total_price)
        }
    }
}
