//! Regional constants: currency, pension terms and planning defaults

mod pension;

pub use pension::{PensionStrategy, UkStatePension, UsSocialSecurity};

use crate::error::PlannerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "UK")]
    Uk,
    #[serde(rename = "US")]
    Us,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Uk, Region::Us];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Uk => "UK",
            Region::Us => "US",
        }
    }

    /// Pension rule applied to this region's state pension inputs
    pub fn pension_strategy(&self) -> &'static dyn PensionStrategy {
        static UK: UkStatePension = UkStatePension;
        static US: UsSocialSecurity = UsSocialSecurity;
        match self {
            Region::Uk => &UK,
            Region::Us => &US,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UK" | "GB" => Ok(Region::Uk),
            "US" | "USA" => Ok(Region::Us),
            other => Err(PlannerError::UnknownRegion(other.to_string())),
        }
    }
}

/// Planning defaults for a region
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalConfig {
    pub region: Region,

    /// Symbol used when formatting amounts
    pub currency_symbol: &'static str,

    /// ISO 4217 code
    pub currency_code: &'static str,

    /// Default pension eligibility age
    pub state_pension_age: u32,

    /// Full annual pension in today's money
    pub state_pension_amount: f64,

    /// Display name of the public pension
    pub pension_name: &'static str,

    /// Long-term inflation, percent
    pub inflation_rate: f64,

    /// Expected investment return, percent
    pub expected_return: f64,

    /// Typical desired retirement income in today's money
    pub desired_annual_income: f64,
}

const UK_CONFIG: RegionalConfig = RegionalConfig {
    region: Region::Uk,
    currency_symbol: "£",
    currency_code: "GBP",
    state_pension_age: 66,
    state_pension_amount: 11_504.0, // 2024/25 full new State Pension
    pension_name: "State Pension",
    inflation_rate: 2.0,
    expected_return: 5.0,
    desired_annual_income: 30_000.0,
};

const US_CONFIG: RegionalConfig = RegionalConfig {
    region: Region::Us,
    currency_symbol: "$",
    currency_code: "USD",
    state_pension_age: 67,
    state_pension_amount: 24_000.0,
    pension_name: "Social Security",
    inflation_rate: 2.5,
    expected_return: 6.0,
    desired_annual_income: 50_000.0,
};

/// Constant lookup of the regional defaults
pub fn get_regional_config(region: Region) -> RegionalConfig {
    match region {
        Region::Uk => UK_CONFIG,
        Region::Us => US_CONFIG,
    }
}
