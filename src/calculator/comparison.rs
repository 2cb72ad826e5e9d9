//! Daily expense versus investing the same amount
//!
//! Runs the calculator twice: once with the recurring expense as entered and
//! once with the amount redirected into savings, then reports the difference.

use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::input::RetirementInput;
use super::assembler::RetirementCalculator;
use super::result::SimpleRetirementResult;

/// Difference made by investing the daily expense instead of spending it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonImpact {
    /// Years earlier retirement becomes possible
    pub retirement_age_improvement: i32,

    /// Days earlier retirement becomes possible
    pub retirement_date_improvement: i64,

    /// Extra pot at retirement
    pub total_savings_improvement: f64,

    /// Expense per year after vacation days
    pub annual_coffee_spending: f64,

    /// Years from now until the with-expense retirement age
    pub years_of_coffee_spending: i32,

    pub total_coffee_spending_until_retirement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeVsInvestmentComparison {
    pub with_coffee: SimpleRetirementResult,
    pub without_coffee: SimpleRetirementResult,
    pub impact: ComparisonImpact,
}

impl RetirementCalculator {
    /// Compare spending the daily expense with investing it.
    ///
    /// Returns `None` when no daily expense is configured.
    pub fn compare(&self, input: &RetirementInput) -> Option<CoffeeVsInvestmentComparison> {
        let expense = input.resolve().expense?;

        let with_coffee = self.calculate(input);
        let without_coffee = self.calculate(&input.with_inverted_expense());

        let current_age = input.current_age(self.today());
        let annual_coffee_spending = expense.annual_total();
        let exposure_age = with_coffee
            .can_retire_at
            .unwrap_or(input.savings_stop_age as i32);
        let years_of_coffee_spending = (exposure_age - current_age).max(0);

        let retirement_age_improvement =
            match (with_coffee.can_retire_at, without_coffee.can_retire_at) {
                (Some(with), Some(without)) => with - without,
                _ => 0,
            };
        let retirement_date_improvement =
            match (with_coffee.retirement_date, without_coffee.retirement_date) {
                (Some(with), Some(without)) => calendar::days_between(without, with),
                _ => 0,
            };

        let impact = ComparisonImpact {
            retirement_age_improvement,
            retirement_date_improvement,
            total_savings_improvement: without_coffee.total_savings_at_retirement
                - with_coffee.total_savings_at_retirement,
            annual_coffee_spending,
            years_of_coffee_spending,
            total_coffee_spending_until_retirement: annual_coffee_spending
                * years_of_coffee_spending as f64,
        };

        log::debug!(
            "daily expense impact: {} days earlier, {:.2} spent per year",
            impact.retirement_date_improvement,
            impact.annual_coffee_spending
        );

        Some(CoffeeVsInvestmentComparison {
            with_coffee,
            without_coffee,
            impact,
        })
    }
}

/// Compare with today's local date
pub fn compare(input: &RetirementInput) -> Option<CoffeeVsInvestmentComparison> {
    RetirementCalculator::new().compare(input)
}
