//! CSV export of projection tables and daily traces

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use super::observer::DayStep;
use super::yearly::YearlyProjection;

/// Write the yearly projection table with a header row
pub fn write_projections_csv<W: Write>(rows: &[YearlyProjection], writer: W) -> Result<()> {
    write_records(rows, writer)
}

/// Write a day-by-day trace with a header row
pub fn write_day_steps_csv<W: Write>(steps: &[DayStep], writer: W) -> Result<()> {
    write_records(steps, writer)
}

fn write_records<T: Serialize, W: Write>(records: &[T], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
