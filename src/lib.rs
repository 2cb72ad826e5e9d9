//! Retirement Planner - day-by-day retirement projection and retirement date search
//!
//! This library provides:
//! - Daily balance simulation (contributions, daily expenses, withdrawals, pension, growth)
//! - Bounded search for the earliest retirement date meeting a depletion target
//! - Year-by-year projection tables and illustrative retirement scenarios
//! - Daily expense versus investment comparison
//! - Regional defaults and pension rules for the UK and US

pub mod calendar;
pub mod error;
pub mod region;
pub mod input;
pub mod projection;
pub mod search;
pub mod calculator;
pub mod format;

// Re-export commonly used types
pub use error::{PlannerError, Result};
pub use region::{get_regional_config, Region, RegionalConfig};
pub use input::{RetirementInput, ResolvedInput};
pub use projection::{DailySimulator, SimulationOutcome, YearlyProjection};
pub use calculator::{
    calculate, compare, CoffeeVsInvestmentComparison, RetirementCalculator, RetirementScenario,
    SimpleRetirementResult,
};
