use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use tracing::debug;

use unit_pricing_core::config::CalculatorConfig;
use unit_pricing_core::format::{format_money, format_optional};
use unit_pricing_core::installment::{
    self, CalculationInput, CalculationResult, CustomInstallmentInput, DownPaymentBasis,
    PaymentFrequency, ValidationPolicy,
};
use unit_pricing_core::parse::{parse_amount, parse_amount_or_zero, parse_years_or};
use unit_pricing_core::record::UnitPaymentColumns;
use unit_pricing_core::types::ComputationOutput;

use crate::input;

/// Price and payment flags shared by every plan-based command
#[derive(Args, Debug, Default)]
#[command(allow_hyphen_values = true)]
pub struct PlanArgs {
    /// List price of the unit (e.g. 1,500,000 or ١٬٥٠٠٬٠٠٠)
    #[arg(long, alias = "price")]
    pub total_price: Option<String>,

    /// Discount on the list price, in percent
    #[arg(long, alias = "discount")]
    pub discount_percentage: Option<String>,

    /// Down payment as a percentage of the discounted price
    #[arg(long = "down-payment-pct")]
    pub down_payment_percentage: Option<String>,

    /// Down payment as an absolute amount (overrides --down-payment-pct)
    #[arg(long = "down-payment")]
    pub down_payment_amount: Option<String>,

    /// Installment term in years
    #[arg(long)]
    pub years: Option<String>,

    /// monthly, quarterly, semi-annual or annual
    #[arg(long)]
    pub frequency: Option<PaymentFrequency>,

    /// Treat unreadable numbers as zero and tolerate out-of-range percentages
    #[arg(long)]
    pub lenient: bool,

    /// Check the down payment against the list price instead of the discounted price
    #[arg(long)]
    pub pre_discount_basis: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a price breakdown
#[derive(Args)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
}

/// Arguments for a dated schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Due date of the first installment (YYYY-MM-DD)
    #[arg(long)]
    pub first_due: NaiveDate,
}

/// Arguments for the stored payment columns
#[derive(Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
}

/// Arguments for a quoted installment analysis
#[derive(Args)]
pub struct CustomPlanArgs {
    /// List price of the unit
    #[arg(long, alias = "price")]
    pub total_price: Option<String>,

    /// Down payment amount
    #[arg(long = "down-payment")]
    pub down_payment_amount: Option<String>,

    /// Quoted amount per installment
    #[arg(long)]
    pub installment_amount: Option<String>,

    /// Installment term in years
    #[arg(long)]
    pub years: Option<String>,

    /// monthly, quarterly, semi-annual or annual
    #[arg(long)]
    pub frequency: Option<PaymentFrequency>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_quote(args: QuoteArgs, cfg: &CalculatorConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let output = quoted(&args.plan, cfg)?;
    let display = display_section(&output.result, cfg);

    let mut value = serde_json::to_value(output)?;
    if let Value::Object(ref mut map) = value {
        map.insert("display".into(), display);
    }
    Ok(value)
}

pub fn run_schedule(
    args: ScheduleArgs,
    cfg: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let output = quoted(&args.plan, cfg)?;
    let schedule = installment::build_schedule(
        &output.result,
        output.result.selected_frequency,
        args.first_due,
    )?;
    debug!(installments = schedule.len(), "schedule built");
    Ok(serde_json::to_value(schedule)?)
}

pub fn run_columns(args: ColumnsArgs, cfg: &CalculatorConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let output = quoted(&args.plan, cfg)?;
    let columns = UnitPaymentColumns::from_result(&output.result);
    Ok(json!({ "result": columns, "warnings": output.warnings }))
}

pub fn run_custom_plan(
    args: CustomPlanArgs,
    cfg: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let custom_input = match input::read_document::<CustomInstallmentInput>(args.input.as_deref())? {
        Some(doc) => doc,
        None => CustomInstallmentInput {
            total_price: parse_required("total_price", args.total_price.as_deref())?,
            down_payment_amount: parse_optional("down_payment_amount", args.down_payment_amount.as_deref())?,
            installment_amount: parse_optional("installment_amount", args.installment_amount.as_deref())?,
            installment_years: years_or_default(args.years.as_deref(), cfg),
            payment_frequency: args.frequency.unwrap_or(cfg.default_frequency),
        },
    };

    let result = installment::analyze_custom_installment(&custom_input)?;
    Ok(serde_json::to_value(result)?)
}

// ---------------------------------------------------------------------------
// Input assembly
// ---------------------------------------------------------------------------

fn quoted(
    args: &PlanArgs,
    cfg: &CalculatorConfig,
) -> Result<ComputationOutput<CalculationResult>, Box<dyn std::error::Error>> {
    let calc_input = match input::read_document::<CalculationInput>(args.input.as_deref())? {
        Some(doc) => doc,
        None => input_from_flags(args, cfg)?,
    };

    let basis = if args.pre_discount_basis {
        DownPaymentBasis::PreDiscount
    } else {
        cfg.down_payment_basis
    };

    Ok(installment::quote(&calc_input, basis)?)
}

/// Build a calculation input from command-line flags and configured defaults.
fn input_from_flags(
    args: &PlanArgs,
    cfg: &CalculatorConfig,
) -> Result<CalculationInput, Box<dyn std::error::Error>> {
    let mut calc_input = cfg.input(Decimal::ZERO);
    if args.lenient {
        calc_input.policy = ValidationPolicy::Lenient;
    }

    let lenient = calc_input.policy == ValidationPolicy::Lenient;
    let amount = |field: &str, text: Option<&str>| -> Result<Decimal, Box<dyn std::error::Error>> {
        match text {
            Some(t) if lenient => Ok(parse_amount_or_zero(t)),
            Some(t) => Ok(parse_amount(field, t)?),
            None => Ok(Decimal::ZERO),
        }
    };

    calc_input.total_price = match args.total_price.as_deref() {
        Some(t) => amount("total_price", Some(t))?,
        None => return Err("--total-price is required (or provide --input)".into()),
    };
    calc_input.discount_percentage =
        amount("discount_percentage", args.discount_percentage.as_deref())?;
    calc_input.down_payment_percentage =
        amount("down_payment_percentage", args.down_payment_percentage.as_deref())?;
    calc_input.down_payment_amount = match args.down_payment_amount.as_deref() {
        Some(t) => Some(amount("down_payment_amount", Some(t))?),
        None => None,
    };
    calc_input.installment_years = years_or_default(args.years.as_deref(), cfg);
    if let Some(frequency) = args.frequency {
        calc_input.payment_frequency = frequency;
    }

    Ok(calc_input)
}

fn years_or_default(text: Option<&str>, cfg: &CalculatorConfig) -> i32 {
    text.map(|t| parse_years_or(t, cfg.default_installment_years))
        .unwrap_or(cfg.default_installment_years)
}

fn parse_required(field: &str, text: Option<&str>) -> Result<Decimal, Box<dyn std::error::Error>> {
    let text = text.ok_or_else(|| format!("--{} is required (or provide --input)", field.replace('_', "-")))?;
    Ok(parse_amount(field, text)?)
}

fn parse_optional(field: &str, text: Option<&str>) -> Result<Decimal, Box<dyn std::error::Error>> {
    match text {
        Some(t) => Ok(parse_amount(field, t)?),
        None => Ok(Decimal::ZERO),
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Rounded, currency-suffixed figures for table and minimal output.
fn display_section(result: &CalculationResult, cfg: &CalculatorConfig) -> Value {
    let money = |amount: Decimal| format_money(amount, &cfg.currency);

    let mut map = Map::new();
    map.insert("total_price".into(), json!(money(result.total_price)));
    map.insert("discount".into(), json!(money(result.discount_amount)));
    map.insert("price_after_discount".into(), json!(money(result.price_after_discount)));
    map.insert("down_payment".into(), json!(money(result.down_payment_amount)));
    map.insert("remaining_amount".into(), json!(money(result.remaining_amount)));
    map.insert("frequency".into(), json!(result.selected_frequency.as_str()));
    map.insert(
        "installment".into(),
        json!(result.selected.per_installment_amount.map(money).unwrap_or_else(|| "-".into())),
    );
    map.insert(
        "installment_count".into(),
        json!(result.selected.total_installment_count),
    );
    for plan in result.plans.iter() {
        map.insert(
            format!("{}_installment", plan.frequency.as_str()),
            json!(format_optional(plan.per_installment_amount)),
        );
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flags(price: &str) -> PlanArgs {
        PlanArgs {
            total_price: Some(price.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_use_config_defaults() {
        let cfg = CalculatorConfig {
            default_installment_years: 6,
            default_frequency: PaymentFrequency::Quarterly,
            ..Default::default()
        };
        let i = input_from_flags(&flags("1,500,000"), &cfg).unwrap();
        assert_eq!(i.total_price, dec!(1_500_000));
        assert_eq!(i.installment_years, 6);
        assert_eq!(i.payment_frequency, PaymentFrequency::Quarterly);
        assert_eq!(i.down_payment_amount, None);
    }

    #[test]
    fn test_flags_accept_arabic_digits() {
        let mut args = flags("١٬٥٠٠٬٠٠٠");
        args.discount_percentage = Some("١٠".into());
        args.down_payment_percentage = Some("20".into());
        args.years = Some("١٠".into());
        let i = input_from_flags(&args, &CalculatorConfig::default()).unwrap();
        assert_eq!(i.discount_percentage, dec!(10));
        assert_eq!(i.installment_years, 10);
    }

    #[test]
    fn test_strict_flags_reject_garbage() {
        let mut args = flags("1000000");
        args.discount_percentage = Some("ten".into());
        let err = input_from_flags(&args, &CalculatorConfig::default()).unwrap_err();
        assert!(err.to_string().contains("discount_percentage"));
    }

    #[test]
    fn test_lenient_flags_zero_garbage() {
        let mut args = flags("1000000");
        args.discount_percentage = Some("ten".into());
        args.lenient = true;
        let i = input_from_flags(&args, &CalculatorConfig::default()).unwrap();
        assert_eq!(i.discount_percentage, Decimal::ZERO);
        assert_eq!(i.policy, ValidationPolicy::Lenient);
    }

    #[test]
    fn test_missing_price_is_an_error() {
        let err = input_from_flags(&PlanArgs::default(), &CalculatorConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--total-price"));
    }

    #[test]
    fn test_display_section_formats_once() {
        let mut i = CalculationInput::new(dec!(1_500_000));
        i.discount_percentage = dec!(10);
        i.down_payment_percentage = dec!(20);
        let out = installment::quote(&i, DownPaymentBasis::PostDiscount).unwrap();
        let d = display_section(&out.result, &CalculatorConfig::default());
        assert_eq!(d["installment"], "9,000 EGP");
        assert_eq!(d["remaining_amount"], "1,080,000 EGP");
        assert_eq!(d["semi_annual_installment"], "54,000");
        assert_eq!(d["installment_count"], 120);
    }
}
