//! Display formatting. Amounts are rounded here and nowhere else.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Currency, Money};

/// Nearest whole currency unit, halves away from zero.
pub fn round_for_display(amount: Money) -> Money {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounded and grouped in thousands with `,` (e.g. `1,080,000`).
pub fn format_amount(amount: Money) -> String {
    let rounded = round_for_display(amount);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < Decimal::ZERO {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// `format_amount` with the currency suffix, e.g. `9,000 EGP`.
pub fn format_money(amount: Money, currency: &Currency) -> String {
    format!("{} {}", format_amount(amount), currency)
}

/// Price lists show `-` where a figure is missing or zero.
pub fn format_optional(amount: Option<Money>) -> String {
    match amount {
        Some(a) if !a.is_zero() => format_amount(a),
        _ => "-".to_string(),
    }
}
