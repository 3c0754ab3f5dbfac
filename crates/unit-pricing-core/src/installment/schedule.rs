//! Dated installment schedule for one payment frequency.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculator::CalculationResult;
use super::frequency::PaymentFrequency;
use crate::error::PricingError;
use crate::types::Money;
use crate::PricingResult;

/// One due installment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledInstallment {
    /// 1-based sequence number.
    pub number: u32,
    pub due_date: NaiveDate,
    pub amount: Money,
    /// Outstanding balance after this installment is paid.
    pub balance_after: Money,
}

/// List every installment of `frequency`, the first falling due on
/// `first_due`. The final installment absorbs any division residual so the
/// balance closes at exactly zero.
pub fn build_schedule(
    result: &CalculationResult,
    frequency: PaymentFrequency,
    first_due: NaiveDate,
) -> PricingResult<Vec<ScheduledInstallment>> {
    let plan = result.plan(frequency);
    let (count, amount) = match (plan.total_installment_count, plan.per_installment_amount) {
        (Some(c), Some(a)) => (c, a),
        _ => return Ok(Vec::new()),
    };

    let step = frequency.months_between_installments();
    // The last due date must exist before the schedule is allocated.
    if count > 0 {
        let last_offset = (count - 1)
            .checked_mul(step)
            .ok_or_else(|| date_overflow(first_due))?;
        first_due
            .checked_add_months(Months::new(last_offset))
            .ok_or_else(|| date_overflow(first_due))?;
    }

    let mut balance = result.remaining_amount.max(Decimal::ZERO);
    let mut schedule = Vec::with_capacity(count as usize);

    for idx in 0..count {
        let offset = idx.checked_mul(step).ok_or_else(|| date_overflow(first_due))?;
        let due_date = first_due
            .checked_add_months(Months::new(offset))
            .ok_or_else(|| date_overflow(first_due))?;

        let payment = if idx + 1 == count { balance } else { amount.min(balance) };
        balance -= payment;

        schedule.push(ScheduledInstallment {
            number: idx + 1,
            due_date,
            amount: payment,
            balance_after: balance,
        });
    }

    Ok(schedule)
}

fn date_overflow(first_due: NaiveDate) -> PricingError {
    PricingError::InvalidInput {
        field: "first_due".into(),
        reason: format!("schedule starting {first_due} runs past the supported calendar"),
    }
}
