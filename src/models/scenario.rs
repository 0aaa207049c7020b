//! Termination scenario model and related types.
//!
//! A [`TerminationScenario`] is the immutable input of a settlement
//! calculation: the employment dates, compensation, termination category and
//! the caller-supplied flags for statutory fines.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The legal category of the termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationCategory {
    /// Dismissal by the employer without cause (Art. 477).
    WithoutCause,
    /// Resignation by the employee.
    Resignation,
    /// Dismissal by the employer for cause (Art. 482).
    ForCause,
    /// Fault on both sides, recognised by a court (Art. 484).
    MutualFault,
    /// Termination by agreement between the parties (Art. 484-A).
    MutualAgreement,
}

impl TerminationCategory {
    /// Returns the snake_case identifier used in JSON and audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationCategory::WithoutCause => "without_cause",
            TerminationCategory::Resignation => "resignation",
            TerminationCategory::ForCause => "for_cause",
            TerminationCategory::MutualFault => "mutual_fault",
            TerminationCategory::MutualAgreement => "mutual_agreement",
        }
    }
}

impl std::fmt::Display for TerminationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the notice period was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeDisposition {
    /// Notice converted to money instead of being worked.
    Indemnified,
    /// Notice worked until the notified end date.
    Worked,
    /// Notice waived by the employer or otherwise not served.
    Waived,
}

impl NoticeDisposition {
    /// Returns the snake_case identifier used in JSON and audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeDisposition::Indemnified => "indemnified",
            NoticeDisposition::Worked => "worked",
            NoticeDisposition::Waived => "waived",
        }
    }
}

impl std::fmt::Display for NoticeDisposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit dates of a notice period that was actually served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeOverride {
    /// First day of the served notice.
    pub start: NaiveDate,
    /// Last day of the served notice.
    pub end: NaiveDate,
}

impl NoticeOverride {
    /// Inclusive length of the override in days.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// The input of a settlement calculation.
///
/// # Example
///
/// ```
/// use settlement_engine::models::{NoticeDisposition, TerminationCategory, TerminationScenario};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let scenario = TerminationScenario::new(
///     "Maria Souza",
///     Decimal::new(300000, 2),
///     NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     TerminationCategory::WithoutCause,
///     NoticeDisposition::Indemnified,
/// );
/// assert_eq!(scenario.overdue_vacation_periods, 0);
/// assert!(!scenario.apply_art_477_fine);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminationScenario {
    /// Employee display name; never used in the math.
    pub employee_name: String,
    /// Employer display name; never used in the math.
    #[serde(default)]
    pub employer_name: Option<String>,
    /// Nominal monthly salary.
    pub monthly_salary: Decimal,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Notified end date, before any notice projection.
    pub end_date: NaiveDate,
    /// Legal category of the termination.
    pub category: TerminationCategory,
    /// How the notice period was handled.
    pub notice: NoticeDisposition,
    /// Dates of a notice actually served, when known.
    #[serde(default)]
    pub notice_override: Option<NoticeOverride>,
    /// Fully accrued vacation periods not yet taken.
    #[serde(default)]
    pub overdue_vacation_periods: i32,
    /// Dependents for downstream tax use; carried through untouched.
    #[serde(default)]
    pub dependents: u32,
    /// Habitual monthly overtime amount.
    #[serde(default)]
    pub additional_hours_amount: Decimal,
    /// Whether danger pay is part of the wage.
    #[serde(default)]
    pub danger_pay: bool,
    /// Whether the night-shift supplement is part of the wage.
    #[serde(default)]
    pub night_shift_pay: bool,
    /// FGTS account balance at termination.
    #[serde(default)]
    pub fgts_balance: Decimal,
    /// Apply the Art. 467 fine on uncontested amounts.
    #[serde(default)]
    pub apply_art_467_fine: bool,
    /// Apply the Art. 477 late-payment fine.
    #[serde(default)]
    pub apply_art_477_fine: bool,
}

impl TerminationScenario {
    /// Creates a scenario with the required fields and neutral defaults for
    /// everything else.
    pub fn new(
        employee_name: impl Into<String>,
        monthly_salary: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
        category: TerminationCategory,
        notice: NoticeDisposition,
    ) -> Self {
        Self {
            employee_name: employee_name.into(),
            employer_name: None,
            monthly_salary,
            start_date,
            end_date,
            category,
            notice,
            notice_override: None,
            overdue_vacation_periods: 0,
            dependents: 0,
            additional_hours_amount: Decimal::ZERO,
            danger_pay: false,
            night_shift_pay: false,
            fgts_balance: Decimal::ZERO,
            apply_art_467_fine: false,
            apply_art_477_fine: false,
        }
    }
}
