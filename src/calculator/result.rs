//! Public result records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::input::RetirementInput;
use crate::projection::YearlyProjection;

/// Snapshot of retiring at one particular offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementScenario {
    /// Days from today
    pub retirement_offset: u32,
    pub retirement_date: NaiveDate,
    pub retirement_age: i32,
    pub run_out_date: Option<NaiveDate>,
    pub survived_to_death: bool,
    pub final_balance_at_death: f64,
}

/// Outcome of a retirement calculation.
///
/// `can_retire_at` and `retirement_date` are `None` when the goal cannot be
/// met even by never retiring. That is an expected result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleRetirementResult {
    /// Age taken from the projection row of the retirement year
    pub can_retire_at: Option<i32>,

    pub retirement_date: Option<NaiveDate>,

    pub projections: Vec<YearlyProjection>,

    /// Pot on the retirement day, or today's savings when unreachable
    pub total_savings_at_retirement: f64,

    pub years_of_retirement: u32,

    /// First day the pot is exhausted, if ever
    pub run_out_date: Option<NaiveDate>,

    /// The input the result was computed from
    #[serde(rename = "formData")]
    pub input: RetirementInput,

    pub scenarios: Vec<RetirementScenario>,
}

impl SimpleRetirementResult {
    pub fn is_achievable(&self) -> bool {
        self.can_retire_at.is_some()
    }

    /// Closing balance of the last projection row
    pub fn final_balance(&self) -> Option<f64> {
        self.projections.last().map(|row| row.end_balance)
    }
}
