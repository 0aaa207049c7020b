//! Salary balance (saldo de salário) for the final month.

use chrono::{Datelike, NaiveDate};

use crate::models::AuditStep;

/// Clause reference for the salary balance.
pub const SALARY_BALANCE_CLAUSE: &str = "Art. 459; Art. 477";

/// The result of counting salary balance days, including the audit step.
#[derive(Debug, Clone)]
pub struct SalaryBalanceResult {
    /// Days of salary due in the final month.
    pub days: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Counts the days worked in the month of the notified end date.
///
/// Counting starts on the first of the month, or on the hire date when the
/// employee was hired that month, and is capped at the commercial month.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::count_salary_balance_days;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap();
/// assert_eq!(count_salary_balance_days(hire, end, 30), 30);
/// ```
pub fn count_salary_balance_days(
    hire_date: NaiveDate,
    end_date: NaiveDate,
    commercial_month_days: u32,
) -> u32 {
    if end_date < hire_date {
        return 0;
    }

    let hired_this_month = hire_date.year() == end_date.year() && hire_date.month() == end_date.month();
    let first_day = if hired_this_month { hire_date.day() } else { 1 };

    (end_date.day() + 1 - first_day).min(commercial_month_days)
}

/// Counts salary balance days and records the audit step.
pub fn calculate_salary_balance_days(
    hire_date: NaiveDate,
    end_date: NaiveDate,
    commercial_month_days: u32,
    step_number: u32,
) -> SalaryBalanceResult {
    let days = count_salary_balance_days(hire_date, end_date, commercial_month_days);

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_balance_days".to_string(),
        rule_name: "Salary Balance Days".to_string(),
        clause_ref: SALARY_BALANCE_CLAUSE.to_string(),
        input: serde_json::json!({
            "hire_date": hire_date.to_string(),
            "end_date": end_date.to_string(),
            "commercial_month_days": commercial_month_days
        }),
        output: serde_json::json!({
            "days": days
        }),
        reasoning: format!("{} days worked in the final month", days),
    };

    SalaryBalanceResult { days, audit_step }
}
