//! Fully-resolved simulation parameters
//!
//! All defaulting of optional input fields happens here, once, so the
//! simulator works with plain values and fractional rates.

use super::RetirementInput;
use chrono::NaiveDate;

/// Recurring daily expense (or, with a negative amount, daily investment)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyExpense {
    /// Amount per expense day in today's money
    pub amount: f64,

    /// Expense days per week, capped at 7
    pub working_days_per_week: u32,

    /// Days per year exempted when annualizing
    pub vacation_days_per_year: u32,
}

impl DailyExpense {
    /// Whether the expense falls on a weekday (Monday = 1 .. Sunday = 7).
    ///
    /// Seven days covers the whole week, six is Monday to Saturday and fewer
    /// days count up from Monday.
    pub fn is_expense_day(&self, weekday: u32) -> bool {
        match self.working_days_per_week {
            7 => true,
            6 => (1..=6).contains(&weekday),
            n => weekday >= 1 && weekday <= n,
        }
    }

    /// Expense days in a year after removing vacation, never negative
    pub fn annual_expense_days(&self) -> u32 {
        (self.working_days_per_week * 52).saturating_sub(self.vacation_days_per_year)
    }

    /// Annualized spend used for reporting
    pub fn annual_total(&self) -> f64 {
        self.amount * self.annual_expense_days() as f64
    }
}

/// Simulation parameters with every default applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInput {
    pub date_of_birth: NaiveDate,
    pub current_savings: f64,
    pub monthly_savings: f64,
    pub savings_stop_age: i32,
    pub death_age: u32,
    pub desired_annual_income: f64,

    /// Annual inflation as a fraction
    pub inflation: f64,

    /// Annual expected return as a fraction
    pub annual_return: f64,

    pub state_pension_age: i32,

    /// Annual pension in today's money after the regional rule
    pub pension_annual: f64,

    pub expense: Option<DailyExpense>,

    pub adjust_savings_for_inflation: bool,
}

impl RetirementInput {
    /// Apply defaults and the regional pension rule
    pub fn resolve(&self) -> ResolvedInput {
        let expense = if self.has_daily_expense() {
            Some(DailyExpense {
                amount: self.daily_expense_amount.unwrap_or(0.0),
                working_days_per_week: self.working_days_per_week.unwrap_or(0).min(7),
                vacation_days_per_year: self.vacation_days_per_year.unwrap_or(0),
            })
        } else {
            None
        };

        let pension_annual = self
            .region
            .pension_strategy()
            .annual_amount(self.state_pension_annual, self.state_pension_percentage);

        ResolvedInput {
            date_of_birth: self.date_of_birth,
            current_savings: self.current_savings,
            monthly_savings: self.monthly_savings,
            savings_stop_age: self.savings_stop_age as i32,
            death_age: self.death_age,
            desired_annual_income: self.desired_annual_income,
            inflation: self.inflation_rate / 100.0,
            annual_return: self.expected_return / 100.0,
            state_pension_age: self.state_pension_age as i32,
            pension_annual,
            expense,
            adjust_savings_for_inflation: self.adjust_savings_for_inflation.unwrap_or(false),
        }
    }
}
