//! Values derived from a scenario by the calculation stages.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Elapsed service time in whole calendar units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tenure {
    /// Completed years.
    pub years: u32,
    /// Completed months beyond the years.
    pub months: u32,
    /// Remaining days beyond the months.
    pub days: u32,
}

impl Tenure {
    /// Total completed months of service.
    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

impl std::fmt::Display for Tenure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}y {}m {}d", self.years, self.months, self.days)
    }
}

/// Quantities derived from a [`TerminationScenario`](super::TerminationScenario)
/// that later stages depend on.
///
/// The scenario itself is never mutated; each stage reads the scenario and
/// the state built so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedState {
    /// Service time from hire date to the projected end date.
    pub tenure: Tenure,
    /// Resolved notice length in days.
    pub notice_days: u32,
    /// Whether the notice projects the contract end date.
    pub notice_projected: bool,
    /// Legal end date used for accruals.
    pub projected_end_date: NaiveDate,
    /// Monthly wage basis including habitual supplements.
    pub wage_basis: Decimal,
    /// Twelfths counted for the 13th salary.
    pub thirteenth_months: u32,
    /// Twelfths counted for proportional vacation.
    pub vacation_months: u32,
    /// Days of salary balance in the final month.
    pub salary_balance_days: u32,
}
