//! Evaluate a broker-quoted installment against the straight-line plan.
//!
//! Developers often advertise a fixed per-period installment rather than a
//! price split. This module answers what the buyer ends up paying for such a
//! quote and how far it sits above (or below) the list price.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::calculator::representable;
use super::frequency::PaymentFrequency;
use crate::error::PricingError;
use crate::types::{with_metadata, ComputationOutput, Money, Percentage};
use crate::PricingResult;

fn default_years() -> i32 {
    super::calculator::DEFAULT_INSTALLMENT_YEARS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomInstallmentInput {
    pub total_price: Money,
    #[serde(default)]
    pub down_payment_amount: Money,
    /// Quoted amount per installment. Zero means "use the straight-line figure".
    #[serde(default)]
    pub installment_amount: Money,
    #[serde(default = "default_years")]
    pub installment_years: i32,
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomInstallmentResult {
    pub remaining_amount: Money,
    pub total_installment_count: u32,
    /// Straight-line installment that would exactly cover the remaining amount.
    pub calculated_installment: Money,
    /// Down payment plus every quoted installment.
    pub total_amount_paid: Money,
    /// `total_amount_paid - total_price`. Negative when the quote under-recovers the price.
    pub premium: Money,
    /// Premium as a percentage of the list price.
    pub premium_percentage: Percentage,
}

pub fn analyze_custom_installment(
    input: &CustomInstallmentInput,
) -> PricingResult<ComputationOutput<CustomInstallmentResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for (field, value) in [
        ("total_price", input.total_price),
        ("down_payment_amount", input.down_payment_amount),
        ("installment_amount", input.installment_amount),
    ] {
        if value < Decimal::ZERO {
            return Err(PricingError::InvalidInput {
                field: field.into(),
                reason: "must not be negative".into(),
            });
        }
    }

    let remaining_amount = input.total_price - input.down_payment_amount;

    let result = if remaining_amount <= Decimal::ZERO || input.installment_years <= 0 {
        warnings.push("Nothing left to finance; no installments are due".into());
        CustomInstallmentResult {
            remaining_amount,
            total_installment_count: 0,
            calculated_installment: Decimal::ZERO,
            total_amount_paid: input.total_price,
            premium: Decimal::ZERO,
            premium_percentage: Decimal::ZERO,
        }
    } else {
        let count = (input.installment_years as u32)
            .checked_mul(input.payment_frequency.installments_per_year())
            .ok_or_else(|| PricingError::InvalidInput {
                field: "installment_years".into(),
                reason: "term overflows the installment count".into(),
            })?;
        let count_dec = Decimal::from(count);
        let calculated_installment = remaining_amount / count_dec;

        let total_amount_paid = if input.installment_amount.is_zero() {
            input.total_price
        } else {
            representable(
                "installment_amount",
                input
                    .installment_amount
                    .checked_mul(count_dec)
                    .and_then(|quoted| quoted.checked_add(input.down_payment_amount)),
            )?
        };
        let premium = total_amount_paid - input.total_price;
        let premium_percentage = if input.total_price.is_zero() {
            Decimal::ZERO
        } else {
            representable(
                "total_price",
                premium
                    .checked_div(input.total_price)
                    .and_then(|share| share.checked_mul(dec!(100))),
            )?
        };

        if premium < Decimal::ZERO {
            warnings.push(format!(
                "Quoted installments recover {} less than the list price",
                premium.abs()
            ));
        }

        CustomInstallmentResult {
            remaining_amount,
            total_installment_count: count,
            calculated_installment,
            total_amount_paid,
            premium,
            premium_percentage,
        }
    };

    debug!(
        premium = %result.premium,
        count = result.total_installment_count,
        "custom installment analysed"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Quoted installment versus straight-line plan",
        input,
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quoted_plan() -> CustomInstallmentInput {
        CustomInstallmentInput {
            total_price: dec!(7_000_000),
            down_payment_amount: dec!(200_000),
            installment_amount: dec!(400_000),
            installment_years: 10,
            payment_frequency: PaymentFrequency::Quarterly,
        }
    }

    #[test]
    fn test_quoted_installment_premium() {
        let r = analyze_custom_installment(&quoted_plan()).unwrap().result;
        assert_eq!(r.remaining_amount, dec!(6_800_000));
        assert_eq!(r.total_installment_count, 40);
        assert_eq!(r.calculated_installment, dec!(170_000));
        // 200,000 + 400,000 * 40
        assert_eq!(r.total_amount_paid, dec!(16_200_000));
        assert_eq!(r.premium, dec!(9_200_000));
    }

    #[test]
    fn test_zero_quote_is_straight_line() {
        let mut input = quoted_plan();
        input.installment_amount = Decimal::ZERO;
        let r = analyze_custom_installment(&input).unwrap().result;
        assert_eq!(r.total_amount_paid, dec!(7_000_000));
        assert_eq!(r.premium, Decimal::ZERO);
    }

    #[test]
    fn test_under_recovering_quote_warns() {
        let mut input = quoted_plan();
        input.installment_amount = dec!(100_000);
        let out = analyze_custom_installment(&input).unwrap();
        assert_eq!(out.result.premium, dec!(-2_800_000));
        assert_eq!(out.result.premium_percentage, dec!(-40));
        assert!(!out.warnings.is_empty());
    }

    #[test]
    fn test_nothing_to_finance() {
        let mut input = quoted_plan();
        input.down_payment_amount = dec!(7_000_000);
        let r = analyze_custom_installment(&input).unwrap().result;
        assert_eq!(r.total_installment_count, 0);
        assert_eq!(r.calculated_installment, Decimal::ZERO);
        assert_eq!(r.total_amount_paid, dec!(7_000_000));
    }

    #[test]
    fn test_quote_beyond_decimal_range_is_rejected() {
        let mut input = quoted_plan();
        input.installment_amount = Decimal::MAX;
        let err = analyze_custom_installment(&input).unwrap_err();
        assert!(
            matches!(err, PricingError::InvalidInput { ref field, .. } if field == "installment_amount"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_premium_percentage_overflow_is_rejected() {
        let input = CustomInstallmentInput {
            total_price: dec!(0.0000000001),
            down_payment_amount: Decimal::ZERO,
            installment_amount: dec!(100_000_000_000_000_000_000),
            installment_years: 1,
            payment_frequency: PaymentFrequency::Annual,
        };
        let err = analyze_custom_installment(&input).unwrap_err();
        assert!(
            matches!(err, PricingError::InvalidInput { ref field, .. } if field == "total_price"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut input = quoted_plan();
        input.installment_amount = dec!(-1);
        assert!(analyze_custom_installment(&input).is_err());
    }
}
