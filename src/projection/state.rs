//! Running state of a single simulation pass

use chrono::NaiveDate;

/// Balance and depletion tracking while days are replayed
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Current pot (signed: withdrawals continue past zero)
    pub balance: f64,

    /// First day whose closing balance was zero or below
    pub first_run_out_date: Option<NaiveDate>,

    /// Closing balance of every simulated day, indexed by day offset
    pub day_balances: Vec<f64>,
}

impl SimulationState {
    /// Start from today's savings, reserving room for the whole window
    pub fn new(opening_balance: f64, total_days: u32) -> Self {
        Self {
            balance: opening_balance,
            first_run_out_date: None,
            day_balances: Vec::with_capacity(total_days as usize + 1),
        }
    }

    /// Record the day's closing balance and the first run-out date
    pub fn close_day(&mut self, date: NaiveDate) {
        self.day_balances.push(self.balance);
        if self.balance <= 0.0 && self.first_run_out_date.is_none() {
            self.first_run_out_date = Some(date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_out_date_recorded_once() {
        let d1 = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2030, 1, 2).unwrap();
        let d3 = NaiveDate::from_ymd_opt(2030, 1, 3).unwrap();

        let mut state = SimulationState::new(10.0, 3);
        state.close_day(d1);
        assert_eq!(state.first_run_out_date, None);

        state.balance = 0.0;
        state.close_day(d2);
        state.balance = -5.0;
        state.close_day(d3);

        assert_eq!(state.first_run_out_date, Some(d2));
        assert_eq!(state.day_balances, vec![10.0, 0.0, -5.0]);
    }
}
