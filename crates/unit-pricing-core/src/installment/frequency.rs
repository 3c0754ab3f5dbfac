//! Payment cadences supported by the installment calculator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// How often the remaining balance is paid down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Quarterly,
    #[serde(alias = "semiAnnual", alias = "semi-annual", alias = "semiannual")]
    SemiAnnual,
    Annual,
}

impl PaymentFrequency {
    /// Every frequency, in display order.
    pub const ALL: [PaymentFrequency; 4] = [
        PaymentFrequency::Monthly,
        PaymentFrequency::Quarterly,
        PaymentFrequency::SemiAnnual,
        PaymentFrequency::Annual,
    ];

    pub fn installments_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::SemiAnnual => 2,
            PaymentFrequency::Annual => 1,
        }
    }

    /// Calendar months between two consecutive due dates.
    pub fn months_between_installments(self) -> u32 {
        12 / self.installments_per_year()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::SemiAnnual => "semi_annual",
            PaymentFrequency::Annual => "annual",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "quarterly" => Ok(PaymentFrequency::Quarterly),
            "semiannual" => Ok(PaymentFrequency::SemiAnnual),
            "annual" | "yearly" => Ok(PaymentFrequency::Annual),
            _ => Err(ValidationError::UnrecognizedFrequency(s.to_string())),
        }
    }
}
