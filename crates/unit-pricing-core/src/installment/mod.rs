pub mod calculator;
pub mod custom_plan;
pub mod frequency;
#[cfg(feature = "schedule")]
pub mod schedule;
pub mod validation;

pub use calculator::{
    compute, CalculationInput, CalculationResult, InstallmentPlan, InstallmentPlans,
    ValidationPolicy, DEFAULT_INSTALLMENT_YEARS,
};
pub use custom_plan::{analyze_custom_installment, CustomInstallmentInput, CustomInstallmentResult};
pub use frequency::PaymentFrequency;
#[cfg(feature = "schedule")]
pub use schedule::{build_schedule, ScheduledInstallment};
pub use validation::{check_down_payment, quote, validate_input, DownPaymentBasis};
