//! Retirement calculator: search, projection table and scenarios
//!
//! Binds a fixed "today" so repeated calls with the same input give identical
//! results.
//!
//! # Example
//! ```ignore
//! let calculator = RetirementCalculator::with_today(today);
//! let result = calculator.calculate(&input);
//! match result.can_retire_at {
//!     Some(age) => println!("Retire at {}", age),
//!     None => println!("Goal not reachable"),
//! }
//! ```

use std::collections::BTreeSet;

use chrono::{Datelike, Local, NaiveDate};
use log::debug;

use crate::calendar;
use crate::input::RetirementInput;
use crate::projection::{round_cents, DailySimulator};
use crate::search::{find_retirement_offset, SearchOutcome};
use super::result::{RetirementScenario, SimpleRetirementResult};

/// Fixed offsets, in days, shown as illustrative scenarios
pub const SCENARIO_OFFSETS: [u32; 7] = [0, 30, 90, 180, 365, 365 * 3, 365 * 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetirementCalculator {
    today: NaiveDate,
}

impl RetirementCalculator {
    /// Calculator anchored on the local calendar date
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Calculator anchored on a given date
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn simulator(&self, input: &RetirementInput) -> DailySimulator {
        DailySimulator::new(input, self.today)
    }

    /// Find the retirement date and build the full result
    pub fn calculate(&self, input: &RetirementInput) -> SimpleRetirementResult {
        let simulator = self.simulator(input);
        let window = *simulator.window();
        debug!(
            "calculating from {} to {} ({} days), current age {}",
            window.today,
            window.death_date,
            window.total_days,
            simulator.current_age()
        );

        let search = find_retirement_offset(&simulator);
        let scenarios = self.scenarios(&simulator, search.offset());

        match search {
            SearchOutcome::Found { offset, simulation, method } => {
                let retirement_date = window.date_at(offset);
                let row = simulation.projection_for_year(retirement_date.year());

                let total_savings_at_retirement = simulation
                    .balance_on_day(offset)
                    .map(round_cents)
                    .or_else(|| row.map(|r| r.start_balance))
                    .unwrap_or(input.current_savings);

                let can_retire_at = row
                    .map(|r| r.age)
                    .unwrap_or_else(|| calendar::age_at(input.date_of_birth, retirement_date));

                debug!(
                    "retire on {} at {} ({:?} search), pot {:.2}",
                    retirement_date, can_retire_at, method, total_savings_at_retirement
                );

                SimpleRetirementResult {
                    can_retire_at: Some(can_retire_at),
                    retirement_date: Some(retirement_date),
                    total_savings_at_retirement,
                    years_of_retirement: (input.death_age as i32 - can_retire_at).max(0) as u32,
                    run_out_date: simulation.first_run_out_date,
                    projections: simulation.yearly_projections,
                    input: input.clone(),
                    scenarios,
                }
            }
            SearchOutcome::Unreachable { terminal } => SimpleRetirementResult {
                can_retire_at: None,
                retirement_date: None,
                total_savings_at_retirement: input.current_savings,
                years_of_retirement: 0,
                run_out_date: terminal.first_run_out_date,
                projections: terminal.yearly_projections,
                input: input.clone(),
                scenarios,
            },
        }
    }

    /// Illustrative scenarios at the fixed offsets plus the found one
    fn scenarios(&self, simulator: &DailySimulator, found: Option<u32>) -> Vec<RetirementScenario> {
        let window = simulator.window();
        let offsets: BTreeSet<u32> = SCENARIO_OFFSETS
            .iter()
            .copied()
            .chain(found)
            .map(|offset| window.clamp_offset(offset))
            .collect();

        offsets
            .into_iter()
            .map(|offset| {
                let outcome = simulator.simulate(offset);
                let retirement_date = window.date_at(offset);
                RetirementScenario {
                    retirement_offset: offset,
                    retirement_date,
                    retirement_age: calendar::age_at(
                        simulator.input().date_of_birth,
                        retirement_date,
                    ),
                    run_out_date: outcome.first_run_out_date,
                    survived_to_death: outcome.survived_to_death(),
                    final_balance_at_death: outcome.final_balance_at_death,
                }
            })
            .collect()
    }
}

impl Default for RetirementCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculate with today's local date
pub fn calculate(input: &RetirementInput) -> SimpleRetirementResult {
    RetirementCalculator::new().calculate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;
    use crate::search::ACCEPTANCE_BAND;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn test_input() -> RetirementInput {
        RetirementInput {
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            region: Region::Uk,
            current_savings: 50_000.0,
            monthly_savings: 800.0,
            savings_stop_age: 65,
            death_age: 85,
            desired_annual_income: 35_000.0,
            inflation_rate: 2.5,
            expected_return: 5.0,
            state_pension_age: 67,
            state_pension_annual: 11_504.0,
            state_pension_percentage: 100.0,
            daily_expense_amount: None,
            working_days_per_week: None,
            vacation_days_per_year: None,
            adjust_savings_for_inflation: Some(true),
        }
    }

    #[test]
    fn test_typical_saver_can_retire() {
        let calculator = RetirementCalculator::with_today(today());
        let result = calculator.calculate(&test_input());

        let age = result.can_retire_at.expect("goal should be reachable");
        assert!(age <= 85);
        assert!(result.retirement_date.is_some());
        assert_eq!(result.years_of_retirement, (85 - age) as u32);

        let final_balance = result.final_balance().unwrap();
        let in_band = final_balance.abs() <= ACCEPTANCE_BAND;
        assert!(in_band || final_balance >= 0.0, "final balance {}", final_balance);
        assert_eq!(result.input, test_input());
    }

    #[test]
    fn test_retirement_age_and_pot_align_with_projection() {
        let calculator = RetirementCalculator::with_today(today());
        let input = test_input();
        let result = calculator.calculate(&input);

        let date = result.retirement_date.unwrap();
        let row = result
            .projections
            .iter()
            .find(|r| r.year == date.year())
            .unwrap();
        assert_eq!(result.can_retire_at, Some(row.age));

        let simulator = calculator.simulator(&input);
        let offset = calendar::days_between(today(), date) as u32;
        let exact = simulator.simulate(offset).balance_on_day(offset).unwrap();
        assert_eq!(result.total_savings_at_retirement, round_cents(exact));
    }

    #[test]
    fn test_unreachable_goal() {
        let mut input = test_input();
        input.current_savings = 0.0;
        input.monthly_savings = 0.0;
        input.death_age = 36;

        let result = RetirementCalculator::with_today(today()).calculate(&input);

        assert_eq!(result.can_retire_at, None);
        assert_eq!(result.retirement_date, None);
        assert!(!result.is_achievable());
        assert_eq!(result.years_of_retirement, 0);
        assert_eq!(result.total_savings_at_retirement, 0.0);
        // An empty pot counts as run out from day 0
        assert_eq!(result.run_out_date, Some(today()));
        assert_eq!(result.projections.len(), 1);

        // Offsets clipped to the 73-day window and deduplicated
        let offsets: Vec<u32> = result.scenarios.iter().map(|s| s.retirement_offset).collect();
        assert_eq!(offsets, vec![0, 30, 73]);
    }

    #[test]
    fn test_scenarios_cover_fixed_offsets_and_found_offset() {
        let calculator = RetirementCalculator::with_today(today());
        let result = calculator.calculate(&test_input());

        let offsets: Vec<u32> = result.scenarios.iter().map(|s| s.retirement_offset).collect();
        for fixed in SCENARIO_OFFSETS {
            assert!(offsets.contains(&fixed));
        }
        let found = calendar::days_between(today(), result.retirement_date.unwrap()) as u32;
        assert!(offsets.contains(&found));
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));

        let first = &result.scenarios[0];
        assert_eq!(first.retirement_date, today());
        assert_eq!(first.retirement_age, 36);
        assert!(!first.survived_to_death);
        assert!(first.run_out_date.is_some());

        let found_scenario =
            result.scenarios.iter().find(|s| s.retirement_offset == found).unwrap();
        assert_eq!(Some(found_scenario.final_balance_at_death), result.final_balance());
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let calculator = RetirementCalculator::with_today(today());
        let input = test_input();
        assert_eq!(calculator.calculate(&input), calculator.calculate(&input));
    }

    #[test]
    fn test_free_function_uses_local_date() {
        let before = Local::now().date_naive().year();
        let result = calculate(&test_input());
        let after = Local::now().date_naive().year();

        // Bracketed so a year change mid-test still passes
        let first_year = result.projections.first().unwrap().year;
        assert!(first_year == before || first_year == after);
    }

    #[test]
    fn test_result_serializes_with_camel_case_keys() {
        let result = RetirementCalculator::with_today(today()).calculate(&test_input());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("canRetireAt").is_some());
        assert!(json.get("totalSavingsAtRetirement").is_some());
        assert_eq!(json["formData"]["region"], "UK");
        assert!(json["projections"][0].get("statePensionIncome").is_some());
    }
}
