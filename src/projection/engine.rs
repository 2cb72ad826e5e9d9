//! Daily retirement simulator
//!
//! Replays every calendar day from today through the assumed death date for a
//! given retirement start offset. Each day applies, in order: contributions,
//! the recurring daily expense, retirement withdrawals net of pension income,
//! and investment growth on a positive balance.

use chrono::{Datelike, NaiveDate};

use crate::calendar;
use crate::input::{ResolvedInput, RetirementInput};
use super::observer::{DayObserver, DayStep, NoopObserver};
use super::state::SimulationState;
use super::yearly::{round_cents, YearBuckets, YearlyProjection};

/// Year length used to spread inflation over elapsed days
const DAYS_PER_INFLATION_YEAR: f64 = 365.25;

/// Compounding periods per year for the daily return
const RETURN_DAYS_PER_YEAR: f64 = 365.0;

/// Daily rate that compounds to `annual_return` over 365 days
pub fn daily_rate_from_annual(annual_return: f64) -> f64 {
    (1.0 + annual_return).powf(1.0 / RETURN_DAYS_PER_YEAR) - 1.0
}

/// The span of days a simulation covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationWindow {
    /// Day 0
    pub today: NaiveDate,

    /// Last day of the death-age year of life
    pub death_date: NaiveDate,

    /// Offset of the last simulated day. Zero when the death date has passed.
    pub total_days: u32,
}

impl SimulationWindow {
    pub fn new(date_of_birth: NaiveDate, death_age: u32, today: NaiveDate) -> Self {
        let death_date = calendar::death_date(date_of_birth, death_age);
        let total_days = calendar::days_between(today, death_date).max(0) as u32;
        Self {
            today,
            death_date,
            total_days,
        }
    }

    /// Calendar date of a day offset
    pub fn date_at(&self, offset: u32) -> NaiveDate {
        calendar::add_days(self.today, offset as i64)
    }

    pub fn clamp_offset(&self, offset: u32) -> u32 {
        offset.min(self.total_days)
    }
}

/// Output of one simulation pass
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// Retirement start offset this pass was run with
    pub retirement_offset: u32,

    pub yearly_projections: Vec<YearlyProjection>,

    /// Balance after the last simulated day, rounded to cents
    pub final_balance_at_death: f64,

    pub first_run_out_date: Option<NaiveDate>,

    /// Closing balance per day offset
    pub day_balances: Vec<f64>,
}

impl SimulationOutcome {
    /// Closing balance on a given day offset
    pub fn balance_on_day(&self, offset: u32) -> Option<f64> {
        self.day_balances.get(offset as usize).copied()
    }

    pub fn projection_for_year(&self, year: i32) -> Option<&YearlyProjection> {
        self.yearly_projections.iter().find(|row| row.year == year)
    }

    /// Whether the pot lasts to the death date
    pub fn survived_to_death(&self) -> bool {
        self.final_balance_at_death >= 0.0
    }
}

/// Simulator bound to one input and one "today"
#[derive(Debug, Clone)]
pub struct DailySimulator {
    input: ResolvedInput,
    window: SimulationWindow,
    daily_return: f64,
    current_age: i32,
}

impl DailySimulator {
    /// Resolve the input's defaults and build the simulation window
    pub fn new(input: &RetirementInput, today: NaiveDate) -> Self {
        Self::from_resolved(input.resolve(), today)
    }

    pub fn from_resolved(input: ResolvedInput, today: NaiveDate) -> Self {
        let window = SimulationWindow::new(input.date_of_birth, input.death_age, today);
        let daily_return = daily_rate_from_annual(input.annual_return);
        let current_age = calendar::age_at(input.date_of_birth, today);
        Self {
            input,
            window,
            daily_return,
            current_age,
        }
    }

    pub fn window(&self) -> &SimulationWindow {
        &self.window
    }

    pub fn input(&self) -> &ResolvedInput {
        &self.input
    }

    /// Age in whole years on day 0
    pub fn current_age(&self) -> i32 {
        self.current_age
    }

    /// Calendar year in which the person reaches the death age
    pub fn death_age_year(&self) -> i32 {
        self.input.date_of_birth.year() + self.input.death_age as i32
    }

    /// Run the whole window with withdrawals starting at `retirement_offset`
    pub fn simulate(&self, retirement_offset: u32) -> SimulationOutcome {
        self.simulate_observed(retirement_offset, &mut NoopObserver)
    }

    /// As `simulate`, reporting every day to `observer`
    pub fn simulate_observed<O: DayObserver + ?Sized>(
        &self,
        retirement_offset: u32,
        observer: &mut O,
    ) -> SimulationOutcome {
        let window = &self.window;
        let mut state = SimulationState::new(self.input.current_savings, window.total_days);
        let mut buckets = YearBuckets::new(window.today.year());

        for day_index in 0..=window.total_days {
            let date = window.date_at(day_index);
            let age = calendar::age_at(self.input.date_of_birth, date);

            let step = self.step_day(&mut state, day_index, date, age, retirement_offset);

            buckets.record(date.year(), &step);
            state.close_day(date);
            observer.on_day(&step);
        }

        let final_balance = state.balance;
        log::trace!(
            "simulated offset {} over {} days: final balance {:.2}",
            retirement_offset,
            window.total_days,
            final_balance
        );

        SimulationOutcome {
            retirement_offset,
            yearly_projections: buckets.into_rows(
                self.death_age_year(),
                self.current_age,
                final_balance,
            ),
            final_balance_at_death: round_cents(final_balance),
            first_run_out_date: state.first_run_out_date,
            day_balances: state.day_balances,
        }
    }

    /// Apply one day's cashflows to the running balance
    fn step_day(
        &self,
        state: &mut SimulationState,
        day_index: u32,
        date: NaiveDate,
        age: i32,
        retirement_offset: u32,
    ) -> DayStep {
        let input = &self.input;
        let days_in_year = calendar::days_in_year(date.year()) as f64;
        let inflation_factor =
            (1.0 + input.inflation).powf(day_index as f64 / DAYS_PER_INFLATION_YEAR);
        let start_balance = state.balance;
        let still_saving = age < input.savings_stop_age;

        // Contributions, spread evenly over the days of the year
        let contribution = if still_saving && input.monthly_savings > 0.0 {
            let monthly = if input.adjust_savings_for_inflation {
                input.monthly_savings * inflation_factor
            } else {
                input.monthly_savings
            };
            monthly * 12.0 / days_in_year
        } else {
            0.0
        };
        state.balance += contribution;

        // Daily expense; a negative amount adds to the pot
        let expense = match input.expense {
            Some(expense)
                if still_saving && expense.is_expense_day(calendar::weekday_number(date)) =>
            {
                expense.amount * inflation_factor
            }
            _ => 0.0,
        };
        state.balance -= expense;

        // Retirement withdrawals, reduced by pension once eligible
        let (withdrawal, pension_income) = if day_index >= retirement_offset {
            let desired = input.desired_annual_income * inflation_factor;
            if age >= input.state_pension_age {
                let pension = input.pension_annual * inflation_factor;
                ((desired - pension).max(0.0) / days_in_year, pension / days_in_year)
            } else {
                (desired / days_in_year, 0.0)
            }
        } else {
            (0.0, 0.0)
        };
        state.balance -= withdrawal;

        // A depleted pot earns nothing
        let growth = if state.balance > 0.0 {
            state.balance * self.daily_return
        } else {
            0.0
        };
        state.balance += growth;

        DayStep {
            day_index,
            date,
            age,
            start_balance,
            contribution,
            expense,
            withdrawal,
            pension_income,
            growth,
            end_balance: state.balance,
        }
    }
}
