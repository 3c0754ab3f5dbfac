use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use unit_pricing_core::installment::{
    compute, quote, CalculationInput, DownPaymentBasis, PaymentFrequency, ValidationPolicy,
};
use unit_pricing_core::record::UnitPaymentColumns;
use unit_pricing_core::{format, parse, PricingError, ValidationError};

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{}: expected ~{}, got {} (diff = {})",
        msg,
        expected,
        actual,
        diff
    );
}

fn input(
    price: Decimal,
    discount: Decimal,
    down_pct: Decimal,
    years: i32,
    frequency: PaymentFrequency,
) -> CalculationInput {
    CalculationInput {
        total_price: price,
        discount_percentage: discount,
        down_payment_percentage: down_pct,
        down_payment_amount: None,
        installment_years: years,
        payment_frequency: frequency,
        policy: ValidationPolicy::Strict,
    }
}

// ===========================================================================
// Worked scenarios
// ===========================================================================

#[test]
fn test_quarterly_plan_with_small_down_payment() {
    // 7,000,000 with 200,000 down (~2.857%) over 10 years, quarterly
    let pct = dec!(200_000) / dec!(7_000_000) * dec!(100);
    let r = compute(&input(dec!(7_000_000), dec!(0), pct, 10, PaymentFrequency::Quarterly))
        .unwrap()
        .result;

    assert_close(r.down_payment_amount, dec!(200_000), dec!(0.0001), "down payment");
    assert_close(r.remaining_amount, dec!(6_800_000), dec!(0.0001), "remaining");
    assert_eq!(r.selected.total_installment_count, Some(40));
    assert_close(
        r.selected.per_installment_amount.unwrap(),
        dec!(170_000),
        dec!(0.0001),
        "quarterly installment",
    );
    assert_eq!(format::format_amount(r.selected.per_installment_amount.unwrap()), "170,000");
}

#[test]
fn test_monthly_plan_with_discount_and_down_payment() {
    let r = compute(&input(dec!(1_500_000), dec!(10), dec!(20), 10, PaymentFrequency::Monthly))
        .unwrap()
        .result;

    assert_eq!(r.price_after_discount, dec!(1_350_000));
    assert_eq!(r.down_payment_amount, dec!(270_000));
    assert_eq!(r.remaining_amount, dec!(1_080_000));
    assert_eq!(r.selected.total_installment_count, Some(120));
    assert_eq!(r.selected.per_installment_amount, Some(dec!(9_000)));
}

#[test]
fn test_zero_price_yields_zeros() {
    for frequency in PaymentFrequency::ALL {
        let r = compute(&input(dec!(0), dec!(35), dec!(40), 7, frequency))
            .unwrap()
            .result;
        assert_eq!(r.price_after_discount, Decimal::ZERO);
        assert_eq!(r.down_payment_amount, Decimal::ZERO);
        assert_eq!(r.remaining_amount, Decimal::ZERO);
        for plan in r.plans.iter() {
            assert_eq!(plan.per_installment_amount, Some(Decimal::ZERO));
        }
    }
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_discount_never_raises_price() {
    for discount in [dec!(0), dec!(0.5), dec!(12.5), dec!(50), dec!(99.99), dec!(100)] {
        let r = compute(&input(dec!(3_250_000), discount, dec!(0), 10, PaymentFrequency::Monthly))
            .unwrap()
            .result;
        assert_eq!(
            r.price_after_discount,
            dec!(3_250_000) * (Decimal::ONE - discount / dec!(100))
        );
        assert!(r.price_after_discount <= dec!(3_250_000));
        assert!(r.price_after_discount >= Decimal::ZERO);
    }
}

#[test]
fn test_down_payment_bounded_by_discounted_price() {
    for down in [dec!(0), dec!(5), dec!(33.3), dec!(80), dec!(100)] {
        let r = compute(&input(dec!(2_400_000), dec!(15), down, 8, PaymentFrequency::Annual))
            .unwrap()
            .result;
        assert!(r.down_payment_amount <= r.price_after_discount);
        assert!(r.remaining_amount >= Decimal::ZERO);
        assert_eq!(r.remaining_amount, r.price_after_discount - r.down_payment_amount);
    }
}

#[test]
fn test_identical_inputs_identical_results() {
    let i = input(dec!(4_321_987), dec!(7.5), dec!(12.25), 9, PaymentFrequency::SemiAnnual);
    let a = compute(&i).unwrap();
    let b = compute(&i).unwrap();
    assert_eq!(a.result, b.result);
    assert_eq!(a.warnings, b.warnings);
}

#[test]
fn test_monthly_times_twelve_matches_annual() {
    let r = compute(&input(dec!(5_555_555), dec!(3), dec!(17), 7, PaymentFrequency::Monthly))
        .unwrap()
        .result;
    let monthly = r.plan(PaymentFrequency::Monthly).per_installment_amount.unwrap();
    let quarterly = r.plan(PaymentFrequency::Quarterly).per_installment_amount.unwrap();
    let annual = r.plan(PaymentFrequency::Annual).per_installment_amount.unwrap();
    assert_close(monthly * dec!(12), annual, dec!(0.000001), "monthly x12");
    assert_close(quarterly * dec!(4), annual, dec!(0.000001), "quarterly x4");
}

#[test]
fn test_non_positive_years_have_no_schedule() {
    for years in [0, -1, -10] {
        let r = compute(&input(dec!(1_000_000), dec!(0), dec!(10), years, PaymentFrequency::Monthly))
            .unwrap()
            .result;
        assert_eq!(r.remaining_amount, dec!(900_000));
        for plan in r.plans.iter() {
            assert_eq!(plan.total_installment_count, None);
            assert_eq!(plan.per_installment_amount, None);
        }
    }
}

#[test]
fn test_full_down_payment_is_zero_amount_schedule() {
    let r = compute(&input(dec!(1_000_000), dec!(0), dec!(100), 10, PaymentFrequency::Monthly))
        .unwrap()
        .result;
    assert_eq!(r.remaining_amount, Decimal::ZERO);
    let counts: Vec<Option<u32>> = r.plans.iter().map(|p| p.total_installment_count).collect();
    assert_eq!(counts, vec![Some(120), Some(40), Some(20), Some(10)]);
    assert!(r
        .plans
        .iter()
        .all(|p| p.per_installment_amount == Some(Decimal::ZERO)));
}

// ===========================================================================
// Form flow: parse -> quote -> columns
// ===========================================================================

#[test]
fn test_form_flow_with_arabic_digits() {
    let mut i = CalculationInput::new(parse::parse_amount("price", "١٬٥٠٠٬٠٠٠").unwrap());
    i.discount_percentage = parse::parse_amount_or_zero("١٠");
    i.down_payment_percentage = parse::parse_amount_or_zero("٢٠");
    i.installment_years = parse::parse_years_or("", 10);

    let out = quote(&i, DownPaymentBasis::PostDiscount).unwrap();
    let cols = UnitPaymentColumns::from_result(&out.result);
    assert_eq!(cols.down_payment, Some(dec!(270_000)));
    assert_eq!(cols.monthly_installment, Some(dec!(9_000)));
}

#[test]
fn test_form_refuses_down_payment_at_price() {
    let mut i = CalculationInput::new(dec!(800_000));
    i.down_payment_amount = Some(dec!(800_000));
    let err = quote(&i, DownPaymentBasis::PostDiscount).unwrap_err();
    assert!(matches!(
        err,
        PricingError::Validation(ValidationError::DownPaymentExceedsPrice { .. })
    ));
}

#[test]
fn test_unknown_frequency_in_json_is_rejected() {
    let res: Result<CalculationInput, _> =
        serde_json::from_str(r#"{"total_price": 100, "payment_frequency": "weekly"}"#);
    assert!(res.is_err());
}
