//! Search for the retirement start offset
//!
//! The final balance at death falls as retirement moves earlier, so the search
//! bisects the offset range looking for a final balance inside the acceptance
//! band around zero. Among in-band offsets it keeps narrowing towards earlier
//! retirement. Monotonicity is assumed, not verified.

use log::debug;
use serde::Serialize;

use crate::projection::{DailySimulator, SimulationOutcome};

/// Half-width of the acceptance band around a zero final balance, in currency units
pub const ACCEPTANCE_BAND: f64 = 50_000.0;

/// Where a final balance sits relative to the acceptance band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPosition {
    /// Shortfall: retire later
    Below,
    Within,
    /// Surplus: retire earlier
    Above,
}

pub fn band_position(final_balance: f64) -> BandPosition {
    if final_balance < -ACCEPTANCE_BAND {
        BandPosition::Below
    } else if final_balance > ACCEPTANCE_BAND {
        BandPosition::Above
    } else {
        BandPosition::Within
    }
}

/// Which phase of the search produced the offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchMethod {
    /// Final balance inside the acceptance band
    Banded,
    /// Earliest offset with a non-negative final balance
    NonNegative,
}

/// Result of the offset search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found {
        offset: u32,
        method: SearchMethod,
        /// Simulation at the found offset
        simulation: SimulationOutcome,
    },
    /// Even never retiring leaves a negative balance at death
    Unreachable {
        /// Simulation at the last day of the window
        terminal: SimulationOutcome,
    },
}

impl SearchOutcome {
    pub fn offset(&self) -> Option<u32> {
        match self {
            SearchOutcome::Found { offset, .. } => Some(*offset),
            SearchOutcome::Unreachable { .. } => None,
        }
    }
}

/// Find the earliest retirement offset whose final balance is acceptable
pub fn find_retirement_offset(simulator: &DailySimulator) -> SearchOutcome {
    let total_days = simulator.window().total_days;

    let terminal = simulator.simulate(total_days);
    debug!(
        "terminal offset {}: final balance {:.2}",
        total_days, terminal.final_balance_at_death
    );
    if terminal.final_balance_at_death < 0.0 {
        debug!("goal unreachable even when retiring on the last day");
        return SearchOutcome::Unreachable { terminal };
    }

    if let Some(simulation) = banded_search(simulator, total_days) {
        return SearchOutcome::Found {
            offset: simulation.retirement_offset,
            method: SearchMethod::Banded,
            simulation,
        };
    }

    let simulation = earliest_non_negative(simulator, total_days, terminal);
    debug!(
        "no in-band offset; earliest non-negative offset is {}",
        simulation.retirement_offset
    );
    SearchOutcome::Found {
        offset: simulation.retirement_offset,
        method: SearchMethod::NonNegative,
        simulation,
    }
}

/// Bisect for an in-band final balance, preferring smaller offsets
fn banded_search(simulator: &DailySimulator, total_days: u32) -> Option<SimulationOutcome> {
    let mut lo: i64 = 0;
    let mut hi: i64 = total_days as i64;
    let mut accepted = None;
    let mut iteration = 0;

    while lo <= hi {
        iteration += 1;
        let mid = (lo + hi) / 2;
        let outcome = simulator.simulate(mid as u32);
        let position = band_position(outcome.final_balance_at_death);

        debug!(
            "iteration {}: offset {} ({:.1}y), final balance {:.2}, {:?} [lo={}, hi={}]",
            iteration,
            mid,
            mid as f64 / 365.25,
            outcome.final_balance_at_death,
            position,
            lo,
            hi
        );

        match position {
            BandPosition::Within => {
                accepted = Some(outcome);
                hi = mid - 1;
            }
            BandPosition::Above => hi = mid - 1,
            BandPosition::Below => lo = mid + 1,
        }
    }

    accepted
}

/// Smallest offset whose final balance is at least zero.
///
/// `terminal` must be the non-negative simulation at `total_days`; it is the
/// answer when no earlier offset qualifies.
fn earliest_non_negative(
    simulator: &DailySimulator,
    total_days: u32,
    terminal: SimulationOutcome,
) -> SimulationOutcome {
    let mut lo = 0u32;
    let mut hi = total_days;
    let mut best = terminal;

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let outcome = simulator.simulate(mid);
        if outcome.final_balance_at_death >= 0.0 {
            hi = mid;
            best = outcome;
        } else {
            lo = mid + 1;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RetirementInput;
    use crate::region::Region;
    use chrono::NaiveDate;

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
    fn test_band_position_edges() {
        assert_eq!(band_position(0.0), BandPosition::Within);
        assert_eq!(band_position(50_000.0), BandPosition::Within);
        assert_eq!(band_position(-50_000.0), BandPosition::Within);
        assert_eq!(band_position(50_000.01), BandPosition::Above);
        assert_eq!(band_position(-50_000.01), BandPosition::Below);
    }

    #[test]
    fn test_typical_saver_gets_earliest_in_band_offset() {
        let simulator = DailySimulator::new(&test_input(), today());

        let (offset, simulation) = match find_retirement_offset(&simulator) {
            SearchOutcome::Found { offset, method, simulation } => {
                assert_eq!(method, SearchMethod::Banded);
                (offset, simulation)
            }
            SearchOutcome::Unreachable { .. } => panic!("expected a reachable goal"),
        };

        assert!(offset > 0 && offset <= simulator.window().total_days);
        assert_eq!(simulation.retirement_offset, offset);
        assert_eq!(simulation, simulator.simulate(offset));
        assert_eq!(band_position(simulation.final_balance_at_death), BandPosition::Within);

        // One day earlier is already a shortfall, so no earlier offset is in band
        let day_before = simulator.simulate(offset - 1);
        assert_eq!(band_position(day_before.final_balance_at_death), BandPosition::Below);
    }

    /// Ten-day window, no growth or inflation, withdrawing 300,000 a day from 1,000,000.
    ///
    /// Each day of earlier retirement costs more than the whole band, so the
    /// final balances step from +100,000 (offset 7) straight to -200,000 (offset 6).
    fn band_skipping_input() -> RetirementInput {
        RetirementInput {
            date_of_birth: NaiveDate::from_ymd_opt(1990, 10, 29).unwrap(),
            region: Region::Uk,
            current_savings: 1_000_000.0,
            monthly_savings: 0.0,
            savings_stop_age: 65,
            death_age: 35,
            desired_annual_income: 300_000.0 * 365.0,
            inflation_rate: 0.0,
            expected_return: 0.0,
            state_pension_age: 67,
            state_pension_annual: 0.0,
            state_pension_percentage: 100.0,
            daily_expense_amount: None,
            working_days_per_week: None,
            vacation_days_per_year: None,
            adjust_savings_for_inflation: Some(false),
        }
    }

    #[test]
    fn test_fallback_finds_later_non_negative_offset_when_band_is_skipped() {
        let simulator = DailySimulator::new(&band_skipping_input(), today());
        assert_eq!(simulator.window().total_days, 9);
        assert_eq!(simulator.simulate(7).final_balance_at_death, 100_000.0);
        assert_eq!(simulator.simulate(6).final_balance_at_death, -200_000.0);
        assert!(banded_search(&simulator, 9).is_none());

        match find_retirement_offset(&simulator) {
            SearchOutcome::Found { offset, method, simulation } => {
                assert_eq!(offset, 7);
                assert_eq!(method, SearchMethod::NonNegative);
                assert_eq!(simulation.final_balance_at_death, 100_000.0);
            }
            SearchOutcome::Unreachable { .. } => panic!("expected a reachable goal"),
        }
    }

    #[test]
    fn test_earliest_non_negative_keeps_terminal_when_nothing_earlier_qualifies() {
        let mut input = band_skipping_input();
        // Only the last day's withdrawal is affordable
        input.current_savings = 350_000.0;
        let simulator = DailySimulator::new(&input, today());

        let terminal = simulator.simulate(9);
        assert_eq!(terminal.final_balance_at_death, 50_000.0);
        let best = earliest_non_negative(&simulator, 9, terminal.clone());
        assert_eq!(best, terminal);
    }

    #[test]
    fn test_unreachable_when_window_end_is_negative() {
        let mut input = test_input();
        input.current_savings = 0.0;
        input.monthly_savings = 0.0;
        input.death_age = 36;

        let simulator = DailySimulator::new(&input, today());
        let outcome = find_retirement_offset(&simulator);

        assert_eq!(outcome.offset(), None);
        match outcome {
            SearchOutcome::Unreachable { terminal } => {
                assert!(terminal.final_balance_at_death < 0.0);
                assert_eq!(terminal.retirement_offset, simulator.window().total_days);
            }
            SearchOutcome::Found { .. } => panic!("expected unreachable"),
        }
    }

    #[test]
    fn test_large_pot_falls_back_to_retiring_today() {
        let mut input = test_input();
        input.current_savings = 10_000_000.0;

        let simulator = DailySimulator::new(&input, today());
        match find_retirement_offset(&simulator) {
            SearchOutcome::Found { offset, method, simulation } => {
                assert_eq!(offset, 0);
                assert_eq!(method, SearchMethod::NonNegative);
                assert!(simulation.final_balance_at_death > ACCEPTANCE_BAND);
            }
            SearchOutcome::Unreachable { .. } => panic!("expected a reachable goal"),
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let simulator = DailySimulator::new(&test_input(), today());
        assert_eq!(find_retirement_offset(&simulator), find_retirement_offset(&simulator));
    }
}
