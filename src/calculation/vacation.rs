//! Proportional vacation.
//!
//! Vacation accrues per acquisition period, which runs from each hire
//! anniversary. The proportional fraction counts the completed months since
//! the most recent anniversary, plus the trailing partial month once it
//! reaches the minimum number of days. Fully accrued periods not yet taken
//! are overdue and supplied by the caller as a count.

use chrono::NaiveDate;

use crate::models::AuditStep;

use super::tenure::{add_months, completed_months};

/// Clause reference for proportional vacation.
pub const VACATION_CLAUSE: &str = "Art. 146 parágrafo único; Art. 147";

/// Clause reference for overdue vacation.
pub const OVERDUE_VACATION_CLAUSE: &str = "Art. 146";

/// Clause reference for the one-third vacation bonus.
pub const VACATION_BONUS_CLAUSE: &str = "CF Art. 7, XVII";

/// The result of counting vacation twelfths, including the audit step.
#[derive(Debug, Clone)]
pub struct VacationMonthsResult {
    /// Start of the current acquisition period.
    pub period_start: NaiveDate,
    /// Twelfths counted (at most 12).
    pub months: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the most recent hire anniversary on or before `end_date`.
pub fn last_anniversary(hire_date: NaiveDate, end_date: NaiveDate) -> NaiveDate {
    let years = completed_months(hire_date, end_date) / 12;
    add_months(hire_date, years * 12)
}

/// Counts the twelfths of proportional vacation in the current period.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::count_vacation_months;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2022, 4, 10).unwrap();
/// // Period began 2024-04-10; 3 full months plus 15 days.
/// let end = NaiveDate::from_ymd_opt(2024, 7, 24).unwrap();
/// assert_eq!(count_vacation_months(hire, end, 15), 4);
/// ```
pub fn count_vacation_months(hire_date: NaiveDate, end_date: NaiveDate, min_days: u32) -> u32 {
    if end_date < hire_date {
        return 0;
    }

    let period_start = last_anniversary(hire_date, end_date);
    let full_months = completed_months(period_start, end_date);
    let anchor = add_months(period_start, full_months);
    let trailing_days = (end_date - anchor).num_days() + 1;

    let partial = u32::from(trailing_days >= i64::from(min_days));
    (full_months + partial).min(12)
}

/// Counts vacation twelfths and records the audit step.
pub fn calculate_vacation_months(
    hire_date: NaiveDate,
    projected_end_date: NaiveDate,
    min_days: u32,
    step_number: u32,
) -> VacationMonthsResult {
    let period_start = last_anniversary(hire_date, projected_end_date);
    let months = count_vacation_months(hire_date, projected_end_date, min_days);

    let audit_step = AuditStep {
        step_number,
        rule_id: "vacation_months".to_string(),
        rule_name: "Vacation Twelfths".to_string(),
        clause_ref: VACATION_CLAUSE.to_string(),
        input: serde_json::json!({
            "hire_date": hire_date.to_string(),
            "projected_end_date": projected_end_date.to_string(),
            "min_days_per_month": min_days
        }),
        output: serde_json::json!({
            "period_start": period_start.to_string(),
            "months": months
        }),
        reasoning: format!(
            "{}/12 counted since acquisition period start {}",
            months, period_start
        ),
    };

    VacationMonthsResult {
        period_start,
        months,
        audit_step,
    }
}
