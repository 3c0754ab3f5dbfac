use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use unit_pricing_core::config::CalculatorConfig;
use unit_pricing_core::installment::{self, CalculationInput, DownPaymentBasis, PaymentFrequency};
use unit_pricing_core::record::UnitPaymentColumns;
use unit_pricing_core::{format, parse, Currency};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_installments(input_json: String) -> NapiResult<String> {
    let input: CalculationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = installment::compute(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct QuoteRequest {
    #[serde(flatten)]
    input: CalculationInput,
    #[serde(default)]
    down_payment_basis: DownPaymentBasis,
}

/// Compute and enforce the down payment rule; the rejection message is meant
/// to be shown to the user as-is.
#[napi]
pub fn quote_installments(input_json: String) -> NapiResult<String> {
    let req: QuoteRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = installment::quote(&req.input, req.down_payment_basis).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_custom_installment(input_json: String) -> NapiResult<String> {
    let input: installment::CustomInstallmentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = installment::analyze_custom_installment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct ScheduleRequest {
    #[serde(flatten)]
    input: CalculationInput,
    first_due: chrono::NaiveDate,
    #[serde(default)]
    frequency: Option<PaymentFrequency>,
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let req: ScheduleRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = installment::compute(&req.input).map_err(to_napi_error)?;
    let frequency = req.frequency.unwrap_or(output.result.selected_frequency);
    let schedule = installment::build_schedule(&output.result, frequency, req.first_due)
        .map_err(to_napi_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Unit records
// ---------------------------------------------------------------------------

/// Columns to write when a unit is saved. Runs the same checks as the form.
#[napi]
pub fn unit_payment_columns(input_json: String) -> NapiResult<String> {
    let req: QuoteRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = installment::quote(&req.input, req.down_payment_basis).map_err(to_napi_error)?;
    let columns = UnitPaymentColumns::from_result(&output.result);
    serde_json::to_string(&columns).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Form helpers
// ---------------------------------------------------------------------------

/// Parse form text to a decimal string. `lenient` mirrors the forms' fallback to zero.
#[napi]
pub fn parse_amount(text: String, lenient: bool) -> NapiResult<String> {
    let value = if lenient {
        parse::parse_amount_or_zero(&text)
    } else {
        parse::parse_amount("amount", &text).map_err(to_napi_error)?
    };
    Ok(value.to_string())
}

/// Format a decimal string for display, e.g. `"9000.4"` -> `"9,000 EGP"`.
#[napi]
pub fn format_money(amount: String, currency: Option<String>) -> NapiResult<String> {
    let value = parse::parse_amount("amount", &amount).map_err(to_napi_error)?;
    let currency = match currency {
        Some(code) => serde_json::from_value::<Currency>(serde_json::Value::String(code.clone()))
            .unwrap_or(Currency::Other(code)),
        None => CalculatorConfig::default().currency,
    };
    Ok(format::format_money(value, &currency))
}
