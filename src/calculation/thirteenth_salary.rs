//! Proportional 13th salary.
//!
//! One twelfth of the wage basis is due per month worked in the calendar
//! year of the (projected) end date, counting from January or from the hire
//! date when hired that year. A month counts once the minimum number of days
//! (15 under the CLT) has been worked in it.
//!
//! When a projected notice carries the contract into the next year, the
//! twelfths of the notified year through December are still owed and are
//! added to those of the projected year, giving references such as `13/12`.

use chrono::Datelike;
use chrono::NaiveDate;

use crate::models::AuditStep;

use super::tenure::month_bounds;

/// Clause reference for the proportional 13th salary.
pub const THIRTEENTH_CLAUSE: &str = "Lei 4.090/1962, Art. 1 §2 and Art. 3";

/// The result of counting 13th-salary twelfths, including the audit step.
#[derive(Debug, Clone)]
pub struct ThirteenthMonthsResult {
    /// Twelfths counted.
    pub months: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn count_in_year(hire_date: NaiveDate, year: i32, end_date: NaiveDate, min_days: u32) -> u32 {
    if end_date < hire_date || hire_date.year() > year || end_date.year() < year {
        return 0;
    }

    let first_month = if hire_date.year() == year {
        hire_date.month()
    } else {
        1
    };
    let last_month = if end_date.year() == year {
        end_date.month()
    } else {
        12
    };

    (first_month..=last_month)
        .filter(|&month| {
            month_bounds(year, month).is_some_and(|(first, last)| {
                let from = first.max(hire_date);
                let to = last.min(end_date);
                (to - from).num_days() + 1 >= i64::from(min_days)
            })
        })
        .count() as u32
}

/// Counts the twelfths of 13th salary earned in the year of `end`.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::count_thirteenth_months;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2020, 5, 4).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(count_thirteenth_months(hire, end, 15), 3);
///
/// let end = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
/// assert_eq!(count_thirteenth_months(hire, end, 15), 2);
/// ```
pub fn count_thirteenth_months(hire_date: NaiveDate, end_date: NaiveDate, min_days: u32) -> u32 {
    count_in_year(hire_date, end_date.year(), end_date, min_days)
}

/// Counts the twelfths owed from the year of the notified end date through
/// the year of the projected end date.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::count_thirteenth_months_spanning;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let notified = NaiveDate::from_ymd_opt(2023, 12, 10).unwrap();
/// let projected = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
/// assert_eq!(count_thirteenth_months_spanning(hire, notified, projected, 15), 13);
/// ```
pub fn count_thirteenth_months_spanning(
    hire_date: NaiveDate,
    notified_end_date: NaiveDate,
    projected_end_date: NaiveDate,
    min_days: u32,
) -> u32 {
    (notified_end_date.year()..=projected_end_date.year())
        .map(|year| count_in_year(hire_date, year, projected_end_date, min_days))
        .sum()
}

/// Counts 13th-salary twelfths and records the audit step.
pub fn calculate_thirteenth_months(
    hire_date: NaiveDate,
    notified_end_date: NaiveDate,
    projected_end_date: NaiveDate,
    min_days: u32,
    step_number: u32,
) -> ThirteenthMonthsResult {
    let months =
        count_thirteenth_months_spanning(hire_date, notified_end_date, projected_end_date, min_days);
    let years = if notified_end_date.year() < projected_end_date.year() {
        format!("{}-{}", notified_end_date.year(), projected_end_date.year())
    } else {
        projected_end_date.year().to_string()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "thirteenth_months".to_string(),
        rule_name: "13th Salary Twelfths".to_string(),
        clause_ref: THIRTEENTH_CLAUSE.to_string(),
        input: serde_json::json!({
            "hire_date": hire_date.to_string(),
            "notified_end_date": notified_end_date.to_string(),
            "projected_end_date": projected_end_date.to_string(),
            "min_days_per_month": min_days
        }),
        output: serde_json::json!({
            "months": months
        }),
        reasoning: format!(
            "{}/12 counted in {} (months with at least {} days worked)",
            months, years, min_days
        ),
    };

    ThirteenthMonthsResult { months, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fifteen_days_counts_a_month() {
        assert_eq!(count_thirteenth_months(date(2020, 1, 1), date(2024, 5, 15), 15), 5);
    }

    #[test]
    fn test_fourteen_days_does_not_count() {
        assert_eq!(count_thirteenth_months(date(2020, 1, 1), date(2024, 5, 14), 15), 4);
    }

    #[test]
    fn test_full_year() {
        assert_eq!(count_thirteenth_months(date(2020, 1, 1), date(2024, 12, 31), 15), 12);
    }

    #[test]
    fn test_hired_in_termination_year_counts_from_hire() {
        // March 17-31 is 15 days; April through June are full.
        assert_eq!(count_thirteenth_months(date(2024, 3, 17), date(2024, 6, 30), 15), 4);
        // March 18-31 is only 14 days.
        assert_eq!(count_thirteenth_months(date(2024, 3, 18), date(2024, 6, 30), 15), 3);
    }

    #[test]
    fn test_hired_and_dismissed_in_same_month() {
        assert_eq!(count_thirteenth_months(date(2024, 3, 1), date(2024, 3, 15), 15), 1);
        assert_eq!(count_thirteenth_months(date(2024, 3, 2), date(2024, 3, 15), 15), 0);
    }

    #[test]
    fn test_projected_example_counts_seven() {
        let result =
            calculate_thirteenth_months(date(2022, 1, 1), date(2024, 7, 1), date(2024, 8, 6), 15, 9);
        assert_eq!(result.months, 7);
        assert_eq!(result.audit_step.step_number, 9);
        assert_eq!(result.audit_step.output["months"], 7);
        assert!(result.audit_step.reasoning.starts_with("7/12"));
    }

    #[test]
    fn test_short_february_needs_fifteen_days() {
        assert_eq!(count_thirteenth_months(date(2020, 1, 1), date(2023, 2, 14), 15), 1);
        assert_eq!(count_thirteenth_months(date(2020, 1, 1), date(2023, 2, 15), 15), 2);
    }

    #[test]
    fn test_projection_into_next_year_keeps_notified_year() {
        // All of 2023 plus January 1-21 of 2024.
        let result = calculate_thirteenth_months(
            date(2020, 1, 1),
            date(2023, 12, 10),
            date(2024, 1, 21),
            15,
            4,
        );
        assert_eq!(result.months, 13);
        assert!(result.audit_step.reasoning.starts_with("13/12 counted in 2023-2024"));
    }

    #[test]
    fn test_projection_into_next_year_short_january() {
        // January 1-14 of the projected year does not count.
        assert_eq!(
            count_thirteenth_months_spanning(date(2020, 1, 1), date(2023, 12, 2), date(2024, 1, 14), 15),
            12
        );
    }

    #[test]
    fn test_projection_into_next_year_hired_in_notified_year() {
        // Hired 2023-10-01: October to December, plus January.
        assert_eq!(
            count_thirteenth_months_spanning(date(2023, 10, 1), date(2023, 12, 20), date(2024, 1, 19), 15),
            4
        );
    }

    #[test]
    fn test_same_year_spanning_matches_single_year() {
        assert_eq!(
            count_thirteenth_months_spanning(date(2022, 1, 1), date(2024, 7, 1), date(2024, 8, 6), 15),
            count_thirteenth_months(date(2022, 1, 1), date(2024, 8, 6), 15)
        );
    }
}
