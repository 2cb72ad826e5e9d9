//! Region-specific public pension rules
//!
//! Each region turns the user's pension inputs into an annual amount in
//! today's money. The simulator only sees the resulting figure.

use std::fmt::Debug;

/// Rule for deriving the annual pension from the user's inputs
pub trait PensionStrategy: Debug + Send + Sync {
    /// Annual pension in today's money
    ///
    /// `full_annual` is the full entitlement entered by the user and
    /// `percentage` the share of it they expect to receive (0-100).
    fn annual_amount(&self, full_annual: f64, percentage: f64) -> f64;

    /// Whether the percentage input has any effect for this rule
    fn uses_percentage(&self) -> bool;
}

/// UK new State Pension: a share of the full amount based on qualifying years
#[derive(Debug, Clone, Copy, Default)]
pub struct UkStatePension;

impl PensionStrategy for UkStatePension {
    fn annual_amount(&self, full_annual: f64, percentage: f64) -> f64 {
        full_annual * percentage.clamp(0.0, 100.0) / 100.0
    }

    fn uses_percentage(&self) -> bool {
        true
    }
}

/// US Social Security: the entered benefit estimate is taken as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct UsSocialSecurity;

impl PensionStrategy for UsSocialSecurity {
    fn annual_amount(&self, full_annual: f64, _percentage: f64) -> f64 {
        full_annual
    }

    fn uses_percentage(&self) -> bool {
        false
    }
}
