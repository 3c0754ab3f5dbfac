//! Straight-line installment calculator.
//!
//! Applies the discount to the list price, takes the down payment as a
//! percentage of the discounted price, and splits the remaining balance into
//! equal installments for every supported payment frequency. All math in
//! `rust_decimal::Decimal`; nothing is rounded here. Rounding belongs to the
//! display layer (`crate::format`) and happens exactly once.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::frequency::PaymentFrequency;
use super::validation;
use crate::error::PricingError;
use crate::types::{with_metadata, ComputationOutput, Money, Percentage};
use crate::PricingResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Installment term used when the form leaves the years field empty.
pub const DEFAULT_INSTALLMENT_YEARS: i32 = 10;

const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// How strictly `compute` treats out-of-range inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Reject negative prices and percentages outside [0, 100].
    #[default]
    Strict,
    /// Treat a negative price as zero and compute whatever the percentages imply.
    Lenient,
}

fn default_installment_years() -> i32 {
    DEFAULT_INSTALLMENT_YEARS
}

/// Parameters for one installment calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// List price of the unit.
    pub total_price: Money,
    /// Discount on the list price, 0-100.
    #[serde(default)]
    pub discount_percentage: Percentage,
    /// Down payment as a share of the discounted price, 0-100.
    #[serde(default)]
    pub down_payment_percentage: Percentage,
    /// Absolute down payment. Takes precedence over the percentage when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_payment_amount: Option<Money>,
    /// Length of the plan. Zero or negative means no installment schedule.
    #[serde(default = "default_installment_years")]
    pub installment_years: i32,
    /// Cadence the buyer selected.
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
    #[serde(default)]
    pub policy: ValidationPolicy,
}

impl CalculationInput {
    pub fn new(total_price: Money) -> Self {
        Self {
            total_price,
            discount_percentage: Decimal::ZERO,
            down_payment_percentage: Decimal::ZERO,
            down_payment_amount: None,
            installment_years: DEFAULT_INSTALLMENT_YEARS,
            payment_frequency: PaymentFrequency::default(),
            policy: ValidationPolicy::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Installment breakdown for a single payment frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    pub frequency: PaymentFrequency,
    pub installments_per_year: u32,
    /// `None` when the plan has no positive term.
    pub total_installment_count: Option<u32>,
    /// `None` when the plan has no positive term; zero when nothing is left to finance.
    pub per_installment_amount: Option<Money>,
}

impl InstallmentPlan {
    /// True when the plan carries a schedule (possibly of zero-amount payments).
    pub fn has_schedule(&self) -> bool {
        self.total_installment_count.is_some()
    }
}

/// The same remaining balance split for each of the four frequencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentPlans {
    pub monthly: InstallmentPlan,
    pub quarterly: InstallmentPlan,
    pub semi_annual: InstallmentPlan,
    pub annual: InstallmentPlan,
}

impl InstallmentPlans {
    pub fn get(&self, frequency: PaymentFrequency) -> &InstallmentPlan {
        match frequency {
            PaymentFrequency::Monthly => &self.monthly,
            PaymentFrequency::Quarterly => &self.quarterly,
            PaymentFrequency::SemiAnnual => &self.semi_annual,
            PaymentFrequency::Annual => &self.annual,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstallmentPlan> {
        [&self.monthly, &self.quarterly, &self.semi_annual, &self.annual].into_iter()
    }
}

/// Full price breakdown of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Price the calculation ran on (a negative price is zeroed under the lenient policy).
    pub total_price: Money,
    pub discount_percentage: Percentage,
    pub discount_amount: Money,
    pub price_after_discount: Money,
    /// Effective down payment share, derived when an absolute amount was given.
    pub down_payment_percentage: Percentage,
    pub down_payment_amount: Money,
    pub remaining_amount: Money,
    pub installment_years: i32,
    pub selected_frequency: PaymentFrequency,
    /// Plan for `selected_frequency`.
    pub selected: InstallmentPlan,
    pub plans: InstallmentPlans,
}

impl CalculationResult {
    pub fn plan(&self, frequency: PaymentFrequency) -> &InstallmentPlan {
        self.plans.get(frequency)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the discount, down payment, remaining balance and per-frequency
/// installment amounts for a unit price.
///
/// Never rejects business-rule violations such as a down payment at or above
/// the price; those surface as warnings and are enforced by
/// [`validation::quote`].
pub fn compute(input: &CalculationInput) -> PricingResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();
    let (result, warnings) = compute_breakdown(input)?;
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Straight-line installments (discount first, down payment on discounted price)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// The calculation without the output envelope. Shared with the validation
/// and schedule modules.
pub(crate) fn compute_breakdown(
    input: &CalculationInput,
) -> PricingResult<(CalculationResult, Vec<String>)> {
    let mut warnings: Vec<String> = Vec::new();

    debug!(
        total_price = %input.total_price,
        discount_percentage = %input.discount_percentage,
        down_payment_percentage = %input.down_payment_percentage,
        installment_years = input.installment_years,
        frequency = %input.payment_frequency,
        policy = ?input.policy,
        "computing installment breakdown"
    );

    let total_price = match input.policy {
        ValidationPolicy::Strict => {
            validation::validate_input(input)?;
            input.total_price
        }
        ValidationPolicy::Lenient => lenient_price(input, &mut warnings),
    };

    if total_price.is_zero() {
        warnings.push("Total price is zero; every derived amount is zero".into());
    }

    let discount_amount =
        representable("discount_percentage", total_price.checked_mul(input.discount_percentage))?
            / HUNDRED;
    let price_after_discount =
        representable("discount_percentage", total_price.checked_sub(discount_amount))?;

    let (down_payment_percentage, down_payment_amount) = match input.down_payment_amount {
        Some(amount) => {
            if !input.down_payment_percentage.is_zero() {
                warnings.push(format!(
                    "Both a down payment amount ({}) and percentage ({}%) were given; using the amount",
                    amount, input.down_payment_percentage
                ));
            }
            let pct = if price_after_discount.is_zero() {
                Decimal::ZERO
            } else {
                representable(
                    "down_payment_amount",
                    amount
                        .checked_div(price_after_discount)
                        .and_then(|share| share.checked_mul(HUNDRED)),
                )?
            };
            (pct, amount)
        }
        None => {
            let amount = representable(
                "down_payment_percentage",
                price_after_discount.checked_mul(input.down_payment_percentage),
            )? / HUNDRED;
            (input.down_payment_percentage, amount)
        }
    };

    let remaining_amount = representable(
        "down_payment_amount",
        price_after_discount.checked_sub(down_payment_amount),
    )?;

    if !price_after_discount.is_zero() && down_payment_amount >= price_after_discount {
        warnings.push(format!(
            "Down payment {} is not below the discounted price {}",
            down_payment_amount, price_after_discount
        ));
    }
    if input.installment_years <= 0 {
        warnings.push(format!(
            "Installment term of {} years; no installment schedule produced",
            input.installment_years
        ));
    }

    let plans = InstallmentPlans {
        monthly: build_plan(PaymentFrequency::Monthly, input.installment_years, remaining_amount)?,
        quarterly: build_plan(
            PaymentFrequency::Quarterly,
            input.installment_years,
            remaining_amount,
        )?,
        semi_annual: build_plan(
            PaymentFrequency::SemiAnnual,
            input.installment_years,
            remaining_amount,
        )?,
        annual: build_plan(PaymentFrequency::Annual, input.installment_years, remaining_amount)?,
    };
    let selected = plans.get(input.payment_frequency).clone();

    let result = CalculationResult {
        total_price,
        discount_percentage: input.discount_percentage,
        discount_amount,
        price_after_discount,
        down_payment_percentage,
        down_payment_amount,
        remaining_amount,
        installment_years: input.installment_years,
        selected_frequency: input.payment_frequency,
        selected,
        plans,
    };

    for w in &warnings {
        debug!(warning = %w, "installment calculation warning");
    }

    Ok((result, warnings))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Unwrap a checked `Decimal` operation, reporting overflow against `field`.
pub(crate) fn representable(field: &str, value: Option<Decimal>) -> PricingResult<Decimal> {
    value.ok_or_else(|| PricingError::InvalidInput {
        field: field.into(),
        reason: "result exceeds the decimal range".into(),
    })
}

fn lenient_price(input: &CalculationInput, warnings: &mut Vec<String>) -> Money {
    for (field, value) in [
        ("discount_percentage", input.discount_percentage),
        ("down_payment_percentage", input.down_payment_percentage),
    ] {
        if value < Decimal::ZERO || value > HUNDRED {
            warnings.push(format!("{field} of {value}% is outside 0-100"));
        }
    }

    if input.total_price < Decimal::ZERO {
        warnings.push(format!(
            "Negative total price {} treated as zero",
            input.total_price
        ));
        Decimal::ZERO
    } else {
        input.total_price
    }
}

fn build_plan(
    frequency: PaymentFrequency,
    installment_years: i32,
    remaining_amount: Money,
) -> PricingResult<InstallmentPlan> {
    let per_year = frequency.installments_per_year();

    if installment_years <= 0 {
        return Ok(InstallmentPlan {
            frequency,
            installments_per_year: per_year,
            total_installment_count: None,
            per_installment_amount: None,
        });
    }

    let count = (installment_years as u32).checked_mul(per_year).ok_or_else(|| {
        PricingError::InvalidInput {
            field: "installment_years".into(),
            reason: format!("{installment_years} years overflows the installment count"),
        }
    })?;

    let amount = if remaining_amount > Decimal::ZERO {
        remaining_amount / Decimal::from(count)
    } else {
        Decimal::ZERO
    };

    Ok(InstallmentPlan {
        frequency,
        installments_per_year: per_year,
        total_installment_count: Some(count),
        per_installment_amount: Some(amount),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
