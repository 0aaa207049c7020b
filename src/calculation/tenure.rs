//! Tenure and calendar arithmetic.
//!
//! Service time is counted in calendar months rather than by dividing a day
//! count: a month is completed once the hire day-of-month is reached again
//! (end-of-month days clamp to the last day of shorter months).

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::Tenure;

/// Clause reference for calendar month counting.
pub const TENURE_CLAUSE: &str = "CC Art. 132 §3";

/// Adds calendar months to a date, clamping to the end of shorter months.
pub(crate) fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Returns the number of whole calendar months from `start` to `end`.
///
/// This is the largest `n` such that `start + n months <= end`.
pub fn completed_months(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }

    let span = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let mut months = span.max(0) as u32;
    while months > 0 && add_months(start, months) > end {
        months -= 1;
    }
    months
}

/// Returns the first and last day of a calendar month.
pub(crate) fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

/// Calculates completed years, months and remaining days of service.
///
/// # Errors
///
/// Returns `InvalidDateRange` if `end` is before `start`.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_tenure;
/// use chrono::NaiveDate;
///
/// let tenure = calculate_tenure(
///     NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
/// )
/// .unwrap();
/// assert_eq!((tenure.years, tenure.months, tenure.days), (2, 6, 0));
/// ```
pub fn calculate_tenure(start: NaiveDate, end: NaiveDate) -> EngineResult<Tenure> {
    if end < start {
        return Err(EngineError::InvalidDateRange { start, end });
    }

    let months = completed_months(start, end);
    let anchor = add_months(start, months);
    let days = (end - anchor).num_days().max(0) as u32;

    Ok(Tenure {
        years: months / 12,
        months: months % 12,
        days,
    })
}
