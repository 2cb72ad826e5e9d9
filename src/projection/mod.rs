//! Day-by-day balance projection for a single retirement offset

mod state;
mod engine;
mod yearly;
mod observer;
mod export;

pub use state::SimulationState;
pub use engine::{daily_rate_from_annual, DailySimulator, SimulationOutcome, SimulationWindow};
pub use yearly::{round_cents, YearlyProjection};
pub use observer::{DayObserver, DayStep, NoopObserver, StepRecorder};
pub use export::{write_day_steps_csv, write_projections_csv};
