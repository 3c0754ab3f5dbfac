//! Numeric text from input forms.
//!
//! Form fields arrive as free text that may use Arabic-Indic digits, Arabic
//! separators, or thousands grouping. Everything is normalised to ASCII
//! before `Decimal` parsing.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ParseError;

const ARABIC_DECIMAL_SEPARATOR: char = '\u{066B}';
const ARABIC_THOUSANDS_SEPARATOR: char = '\u{066C}';

/// Map locale digits and separators to plain ASCII number text.
pub fn normalize_digits(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{0660}'..='\u{0669}' => char::from_digit(c as u32 - 0x0660, 10),
            '\u{06F0}'..='\u{06F9}' => char::from_digit(c as u32 - 0x06F0, 10),
            ARABIC_DECIMAL_SEPARATOR => Some('.'),
            ',' | ARABIC_THOUSANDS_SEPARATOR | '\u{00A0}' | '\u{202F}' => None,
            c if c.is_whitespace() => None,
            c => Some(c),
        })
        .collect()
}

/// Strict parse. Empty or non-numeric text is an error naming `field`.
pub fn parse_amount(field: &str, text: &str) -> Result<Decimal, ParseError> {
    let normalized = normalize_digits(text);
    if normalized.is_empty() {
        return Err(parse_error(field, text));
    }
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|_| parse_error(field, text))
}

/// Lenient parse used by the calculator forms: anything unreadable is zero.
pub fn parse_amount_or_zero(text: &str) -> Decimal {
    parse_amount("", text).unwrap_or(Decimal::ZERO)
}

/// Whole years from form text, falling back to `default` when unreadable.
/// Fractional input is truncated.
pub fn parse_years_or(text: &str, default: i32) -> i32 {
    let normalized = normalize_digits(text);
    let whole = normalized.split('.').next().unwrap_or_default();
    whole.parse::<i32>().unwrap_or(default)
}

fn parse_error(field: &str, text: &str) -> ParseError {
    ParseError {
        field: field.to_string(),
        text: text.to_string(),
    }
}
