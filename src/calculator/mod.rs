//! Retirement calculation entry points and result records

mod assembler;
mod comparison;
mod result;

pub use assembler::{calculate, RetirementCalculator, SCENARIO_OFFSETS};
pub use comparison::{compare, ComparisonImpact, CoffeeVsInvestmentComparison};
pub use result::{RetirementScenario, SimpleRetirementResult};
