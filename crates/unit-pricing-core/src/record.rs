//! Payment columns saved on a unit record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::round_for_display;
use crate::installment::{CalculationResult, PaymentFrequency};
use crate::types::{Money, Percentage};

/// The numeric columns the unit form writes to the record store. Column
/// names match the store schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPaymentColumns {
    pub price: Money,
    pub discount_percentage: Percentage,
    pub down_payment: Option<Money>,
    pub monthly_installment: Option<Money>,
    pub quarterly_installment: Option<Money>,
    pub semi_annual_installment: Option<Money>,
    pub annual_installment: Option<Money>,
    pub installment_years: i32,
}

impl UnitPaymentColumns {
    /// Installments are stored as whole units. A zero down payment and absent
    /// or zero installments are stored as null.
    pub fn from_result(result: &CalculationResult) -> Self {
        let stored = |frequency: PaymentFrequency| -> Option<Money> {
            result
                .plan(frequency)
                .per_installment_amount
                .filter(|a| *a > Decimal::ZERO)
                .map(round_for_display)
        };

        Self {
            price: result.total_price,
            discount_percentage: result.discount_percentage,
            down_payment: Some(result.down_payment_amount).filter(|a| !a.is_zero()),
            monthly_installment: stored(PaymentFrequency::Monthly),
            quarterly_installment: stored(PaymentFrequency::Quarterly),
            semi_annual_installment: stored(PaymentFrequency::SemiAnnual),
            annual_installment: stored(PaymentFrequency::Annual),
            installment_years: result.installment_years,
        }
    }

    pub fn installment_for(&self, frequency: PaymentFrequency) -> Option<Money> {
        match frequency {
            PaymentFrequency::Monthly => self.monthly_installment,
            PaymentFrequency::Quarterly => self.quarterly_installment,
            PaymentFrequency::SemiAnnual => self.semi_annual_installment,
            PaymentFrequency::Annual => self.annual_installment,
        }
    }
}
