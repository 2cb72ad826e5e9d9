//! Per-calendar-year aggregation of the daily simulation

use serde::{Deserialize, Serialize};

use super::observer::DayStep;

/// Round a currency amount to cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// One row of the projection table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyProjection {
    pub year: i32,

    /// Current age plus elapsed calendar years, independent of the row's dates
    pub age: i32,

    pub start_balance: f64,

    /// Contributions net of any daily expense (investment-mode expense adds)
    pub contributions: f64,

    pub growth: f64,
    pub withdrawals: f64,
    pub state_pension_income: f64,

    /// Signed: a depleted pot keeps going negative
    pub end_balance: f64,
}

impl YearlyProjection {
    /// Placeholder for a year the simulation never reached
    pub fn empty(year: i32, age: i32) -> Self {
        Self {
            year,
            age,
            start_balance: 0.0,
            contributions: 0.0,
            growth: 0.0,
            withdrawals: 0.0,
            state_pension_income: 0.0,
            end_balance: 0.0,
        }
    }
}

/// Running totals for one calendar year while the simulation is in progress
#[derive(Debug, Clone)]
pub(crate) struct YearBucket {
    pub year: i32,
    pub start_balance: f64,
    pub contributions: f64,
    pub growth: f64,
    pub withdrawals: f64,
    pub state_pension_income: f64,
    pub end_balance: f64,
}

impl YearBucket {
    fn open(year: i32, balance: f64) -> Self {
        Self {
            year,
            start_balance: balance,
            contributions: 0.0,
            growth: 0.0,
            withdrawals: 0.0,
            state_pension_income: 0.0,
            end_balance: balance,
        }
    }

    fn record(&mut self, step: &DayStep) {
        self.contributions += step.contribution - step.expense;
        self.growth += step.growth;
        self.withdrawals += step.withdrawal;
        self.state_pension_income += step.pension_income;
        self.end_balance = step.end_balance;
    }

    fn to_row(&self, age: i32) -> YearlyProjection {
        YearlyProjection {
            year: self.year,
            age,
            start_balance: round_cents(self.start_balance),
            contributions: round_cents(self.contributions),
            growth: round_cents(self.growth),
            withdrawals: round_cents(self.withdrawals),
            state_pension_income: round_cents(self.state_pension_income),
            end_balance: round_cents(self.end_balance),
        }
    }
}

/// Year buckets stored in calendar order, indexed by years since the start year
#[derive(Debug, Clone)]
pub(crate) struct YearBuckets {
    start_year: i32,
    buckets: Vec<YearBucket>,
}

impl YearBuckets {
    pub fn new(start_year: i32) -> Self {
        Self {
            start_year,
            buckets: Vec::new(),
        }
    }

    /// Record a day, opening a new bucket at the first day of each year.
    ///
    /// Days arrive in calendar order, so the bucket for `step.date`'s year is
    /// always the last one or the next to be opened.
    pub fn record(&mut self, year: i32, step: &DayStep) {
        let needs_bucket = self.buckets.last().map_or(true, |b| b.year != year);
        if needs_bucket {
            self.buckets.push(YearBucket::open(year, step.start_balance));
        }
        if let Some(bucket) = self.buckets.last_mut() {
            bucket.record(step);
        }
    }

    fn get(&self, year: i32) -> Option<&YearBucket> {
        let idx = usize::try_from(year - self.start_year).ok()?;
        self.buckets.get(idx).filter(|b| b.year == year)
    }

    /// Build the projection table from the start year through `end_year`.
    ///
    /// The `end_year` row closes on `final_balance` even when the simulation
    /// window ran into the following calendar year.
    pub fn into_rows(
        self,
        end_year: i32,
        current_age: i32,
        final_balance: f64,
    ) -> Vec<YearlyProjection> {
        (self.start_year..=end_year)
            .map(|year| {
                let age = current_age + (year - self.start_year);
                match self.get(year) {
                    Some(bucket) => {
                        let mut row = bucket.to_row(age);
                        if year == end_year {
                            row.end_balance = round_cents(final_balance);
                        }
                        row
                    }
                    None => YearlyProjection::empty(year, age),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn step(date: NaiveDate, start: f64, contribution: f64, growth: f64) -> DayStep {
        DayStep {
            day_index: 0,
            date,
            age: 40,
            start_balance: start,
            contribution,
            expense: 0.0,
            withdrawal: 0.0,
            pension_income: 0.0,
            growth,
            end_balance: start + contribution + growth,
        }
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(1.234), 1.23);
        assert_eq!(round_cents(1.235_1), 1.24);
        assert_eq!(round_cents(-10.004), -10.0);
    }

    #[test]
    fn test_buckets_split_on_year_boundary() {
        let mut buckets = YearBuckets::new(2026);
        let dec31 = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let jan1 = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();

        buckets.record(2026, &step(dec31, 100.0, 10.0, 1.0));
        buckets.record(2027, &step(jan1, 111.0, 10.0, 2.0));

        let rows = buckets.into_rows(2028, 36, 123.0);
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].year, 2026);
        assert_eq!(rows[0].age, 36);
        assert_eq!(rows[0].start_balance, 100.0);
        assert_eq!(rows[0].end_balance, 111.0);

        assert_eq!(rows[1].start_balance, 111.0);
        assert_eq!(rows[1].contributions, 10.0);
        assert_eq!(rows[1].growth, 2.0);

        // Never simulated: zero row with a stable age
        assert_eq!(rows[2], YearlyProjection::empty(2028, 38));
    }

    #[test]
    fn test_last_row_closes_on_final_balance() {
        let mut buckets = YearBuckets::new(2026);
        let date = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        buckets.record(2026, &step(date, 50.0, 0.0, 0.0));

        let rows = buckets.into_rows(2026, 80, -42.129);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].end_balance, -42.13);
    }
}
