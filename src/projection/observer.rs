//! Step-level diagnostics for the daily simulation
//!
//! The simulator reports every simulated day to a `DayObserver`. Plain
//! projections use `NoopObserver`; tests and the CLI trace export plug in a
//! recorder instead.

use chrono::NaiveDate;
use serde::Serialize;

/// Everything that happened to the balance on one simulated day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStep {
    /// Days since the simulation start (0 = today)
    pub day_index: u32,
    pub date: NaiveDate,
    pub age: i32,
    pub start_balance: f64,
    pub contribution: f64,

    /// Daily expense taken out (negative when invested instead)
    pub expense: f64,

    pub withdrawal: f64,

    /// Pension received, which offsets the withdrawal rather than entering the pot
    pub pension_income: f64,

    pub growth: f64,
    pub end_balance: f64,
}

/// Receives each simulated day in order
pub trait DayObserver {
    fn on_day(&mut self, step: &DayStep);
}

/// Discards every step
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DayObserver for NoopObserver {
    #[inline]
    fn on_day(&mut self, _step: &DayStep) {}
}

/// Keeps every step in memory
#[derive(Debug, Clone, Default)]
pub struct StepRecorder {
    pub steps: Vec<DayStep>,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DayObserver for StepRecorder {
    fn on_day(&mut self, step: &DayStep) {
        self.steps.push(step.clone());
    }
}

impl<F: FnMut(&DayStep)> DayObserver for F {
    fn on_day(&mut self, step: &DayStep) {
        self(step)
    }
}
