//! Retirement input record, default resolution and JSON loading

mod data;
mod resolved;
pub mod loader;

pub use data::RetirementInput;
pub use resolved::{DailyExpense, ResolvedInput};
pub use loader::{load_input, load_input_from_reader, load_inputs, load_inputs_from_reader};
