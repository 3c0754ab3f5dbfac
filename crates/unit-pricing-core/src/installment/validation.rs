//! Input range checks and the caller-level down payment rule.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::calculator::{compute_breakdown, CalculationInput, CalculationResult};
use crate::error::ValidationError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::PricingResult;

/// Which price the down payment must stay strictly below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownPaymentBasis {
    /// Compare against the price after discount.
    #[default]
    PostDiscount,
    /// Compare against the list price, ignoring the discount.
    PreDiscount,
}

/// Strict range checks: non-negative price and down payment amount,
/// percentages within 0-100.
pub fn validate_input(input: &CalculationInput) -> Result<(), ValidationError> {
    if input.total_price < Decimal::ZERO {
        return Err(out_of_range("total_price", input.total_price, Decimal::ZERO, Decimal::MAX));
    }
    check_percentage("discount_percentage", input.discount_percentage)?;
    check_percentage("down_payment_percentage", input.down_payment_percentage)?;
    if let Some(amount) = input.down_payment_amount {
        if amount < Decimal::ZERO {
            return Err(out_of_range("down_payment_amount", amount, Decimal::ZERO, Decimal::MAX));
        }
    }
    Ok(())
}

/// The down payment must be strictly below the basis price. A zero basis
/// price has nothing to compare against and passes.
pub fn check_down_payment(
    result: &CalculationResult,
    basis: DownPaymentBasis,
) -> Result<(), ValidationError> {
    let price = basis_price(result, basis);
    if price.is_zero() {
        return Ok(());
    }
    if result.down_payment_amount >= price {
        return Err(ValidationError::DownPaymentExceedsPrice {
            down_payment: result.down_payment_amount,
            price,
        });
    }
    Ok(())
}

/// Compute a breakdown and enforce the down payment rule on it. This is what
/// a form calls before showing or saving numbers.
pub fn quote(
    input: &CalculationInput,
    basis: DownPaymentBasis,
) -> PricingResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();
    let (result, warnings) = compute_breakdown(input)?;

    if let Err(e) = check_down_payment(&result, basis) {
        debug!(error = %e, ?basis, "quote rejected");
        return Err(e.into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Validated straight-line installment quote",
        input,
        warnings,
        elapsed,
        result,
    ))
}

fn basis_price(result: &CalculationResult, basis: DownPaymentBasis) -> Money {
    match basis {
        DownPaymentBasis::PostDiscount => result.price_after_discount,
        DownPaymentBasis::PreDiscount => result.total_price,
    }
}

fn check_percentage(field: &str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(out_of_range(field, value, Decimal::ZERO, dec!(100)));
    }
    Ok(())
}

fn out_of_range(field: &str, value: Decimal, min: Decimal, max: Decimal) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        value,
        min,
        max,
    }
}
