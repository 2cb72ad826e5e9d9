//! User-facing retirement input record

use crate::calendar;
use crate::error::{PlannerError, Result};
use crate::region::{get_regional_config, Region};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything a calculation needs, as entered by the user.
///
/// Rates are percentages (2.5 means 2.5%). The optional fields describe the
/// recurring daily expense used by comparison mode and the contribution
/// inflation switch; `RetirementInput::resolve` fills them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementInput {
    pub date_of_birth: NaiveDate,

    pub region: Region,

    /// Savings pot today
    pub current_savings: f64,

    /// Contribution per month in today's money
    pub monthly_savings: f64,

    /// Contributions (and the daily expense) stop from this age
    pub savings_stop_age: u32,

    /// Assumed age at death; the simulation runs to the end of this year of life
    pub death_age: u32,

    /// Desired retirement income in today's money
    pub desired_annual_income: f64,

    /// Annual inflation, percent
    pub inflation_rate: f64,

    /// Annual investment return, percent
    pub expected_return: f64,

    /// Age from which the public pension is paid
    pub state_pension_age: u32,

    /// Full annual public pension in today's money
    pub state_pension_annual: f64,

    /// Share of the full pension expected, 0-100
    pub state_pension_percentage: f64,

    /// Recurring daily spend. Negative means the amount is invested instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_expense_amount: Option<f64>,

    /// Days per week the expense occurs (1-7)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_days_per_week: Option<u32>,

    /// Days per year the expense does not occur
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacation_days_per_year: Option<u32>,

    /// Grow the monthly contribution with inflation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjust_savings_for_inflation: Option<bool>,
}

impl RetirementInput {
    /// Default input for a region, seeded from the regional constants table
    pub fn regional_default(region: Region, date_of_birth: NaiveDate) -> Self {
        let config = get_regional_config(region);
        Self {
            date_of_birth,
            region,
            current_savings: 0.0,
            monthly_savings: 500.0,
            savings_stop_age: 65,
            death_age: 85,
            desired_annual_income: config.desired_annual_income,
            inflation_rate: config.inflation_rate,
            expected_return: config.expected_return,
            state_pension_age: config.state_pension_age,
            state_pension_annual: config.state_pension_amount,
            state_pension_percentage: 100.0,
            daily_expense_amount: None,
            working_days_per_week: None,
            vacation_days_per_year: None,
            adjust_savings_for_inflation: Some(true),
        }
    }

    /// Whether a recurring daily expense is configured
    pub fn has_daily_expense(&self) -> bool {
        let amount = self.daily_expense_amount.unwrap_or(0.0);
        let days = self.working_days_per_week.unwrap_or(0);
        amount != 0.0 && days > 0
    }

    /// Copy of this input with the daily expense redirected into savings
    pub fn with_inverted_expense(&self) -> Self {
        Self {
            daily_expense_amount: self.daily_expense_amount.map(|amount| -amount),
            ..self.clone()
        }
    }

    /// Range checks for callers that accept untrusted input.
    ///
    /// The projection itself never calls this.
    pub fn validate(&self) -> Result<()> {
        let checks: [(bool, String); 9] = [
            (
                self.current_savings >= 0.0,
                format!("current savings must be non-negative, got {}", self.current_savings),
            ),
            (
                self.monthly_savings >= 0.0,
                format!("monthly savings must be non-negative, got {}", self.monthly_savings),
            ),
            (
                self.desired_annual_income >= 0.0,
                format!("desired income must be non-negative, got {}", self.desired_annual_income),
            ),
            (
                (0.0..=100.0).contains(&self.state_pension_percentage),
                format!(
                    "state pension percentage must be within 0-100, got {}",
                    self.state_pension_percentage
                ),
            ),
            (
                self.savings_stop_age <= self.death_age,
                format!(
                    "savings stop age {} is after death age {}",
                    self.savings_stop_age, self.death_age
                ),
            ),
            (
                self.working_days_per_week.map_or(true, |d| d <= 7),
                format!(
                    "working days per week must be within 0-7, got {:?}",
                    self.working_days_per_week
                ),
            ),
            (
                self.vacation_days_per_year.map_or(true, |d| d <= 366),
                format!(
                    "vacation days per year must be at most 366, got {:?}",
                    self.vacation_days_per_year
                ),
            ),
            (
                self.expected_return > -100.0,
                format!("expected return must exceed -100%, got {}", self.expected_return),
            ),
            (
                self.inflation_rate > -100.0,
                format!("inflation rate must exceed -100%, got {}", self.inflation_rate),
            ),
        ];

        match checks.into_iter().find(|(ok, _)| !ok) {
            Some((_, message)) => Err(PlannerError::InvalidInput(message)),
            None => Ok(()),
        }
    }

    /// Current age in whole years on `today`
    pub fn current_age(&self, today: NaiveDate) -> i32 {
        calendar::age_at(self.date_of_birth, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
    }

    #[test]
    fn test_regional_default_uses_table() {
        let input = RetirementInput::regional_default(Region::Us, dob());
        assert_eq!(input.state_pension_age, 67);
        assert_eq!(input.state_pension_annual, 24_000.0);
        assert_eq!(input.desired_annual_income, 50_000.0);
        assert_eq!(input.adjust_savings_for_inflation, Some(true));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_has_daily_expense_requires_amount_and_days() {
        let mut input = RetirementInput::regional_default(Region::Uk, dob());
        assert!(!input.has_daily_expense());

        input.daily_expense_amount = Some(4.5);
        assert!(!input.has_daily_expense());

        input.working_days_per_week = Some(5);
        assert!(input.has_daily_expense());

        input.daily_expense_amount = Some(0.0);
        assert!(!input.has_daily_expense());
    }

    #[test]
    fn test_inverted_expense_flips_sign_only() {
        let mut input = RetirementInput::regional_default(Region::Uk, dob());
        input.daily_expense_amount = Some(5.0);
        input.working_days_per_week = Some(5);
        input.vacation_days_per_year = Some(25);

        let inverted = input.with_inverted_expense();
        assert_eq!(inverted.daily_expense_amount, Some(-5.0));
        assert_eq!(inverted.working_days_per_week, Some(5));
        assert_eq!(inverted.vacation_days_per_year, Some(25));
        assert_eq!(inverted.with_inverted_expense(), input);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut input = RetirementInput::regional_default(Region::Uk, dob());
        input.state_pension_percentage = 120.0;
        assert!(matches!(input.validate(), Err(PlannerError::InvalidInput(_))));

        let mut input = RetirementInput::regional_default(Region::Uk, dob());
        input.savings_stop_age = 90;
        assert!(input.validate().is_err());

        let mut input = RetirementInput::regional_default(Region::Uk, dob());
        input.working_days_per_week = Some(8);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = r#"{
            "dateOfBirth": "1990-01-01",
            "region": "UK",
            "currentSavings": 50000,
            "monthlySavings": 800,
            "savingsStopAge": 65,
            "deathAge": 85,
            "desiredAnnualIncome": 35000,
            "inflationRate": 2.5,
            "expectedReturn": 5.0,
            "statePensionAge": 67,
            "statePensionAnnual": 11504,
            "statePensionPercentage": 100
        }"#;
        let input: RetirementInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.date_of_birth, dob());
        assert_eq!(input.region, Region::Uk);
        assert_eq!(input.daily_expense_amount, None);
        assert_eq!(input.adjust_savings_for_inflation, None);
    }
}
