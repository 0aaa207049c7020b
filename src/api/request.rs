//! Request types for the Termination Settlement Engine API.
//!
//! This module defines the JSON request structures for the `/calculate` endpoint.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{NoticeDisposition, NoticeOverride, TerminationCategory, TerminationScenario};

/// Request body for the `/calculate` endpoint.
///
/// Contains everything needed to compute the settlement for one terminated
/// contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRequest {
    /// The employee information.
    pub employee: EmployeeRequest,
    /// Optional employer display name.
    #[serde(default)]
    pub employer_name: Option<String>,
    /// The contract being terminated.
    pub contract: ContractRequest,
    /// How the contract ended.
    pub termination: TerminationRequest,
    /// FGTS account balance at termination.
    #[serde(default)]
    pub fgts_balance: Decimal,
    /// Statutory fines the caller asserts apply.
    #[serde(default)]
    pub fines: FinesRequest,
}

/// Employee information in a settlement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Employee display name.
    pub name: String,
    /// Number of dependents.
    #[serde(default)]
    pub dependents: u32,
}

/// Contract information in a settlement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRequest {
    /// Nominal monthly salary.
    pub monthly_salary: Decimal,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Notified end date.
    pub end_date: NaiveDate,
    /// Habitual monthly overtime amount.
    #[serde(default)]
    pub additional_hours_amount: Decimal,
    /// Whether danger pay is part of the wage.
    #[serde(default)]
    pub danger_pay: bool,
    /// Whether the night-shift supplement is part of the wage.
    #[serde(default)]
    pub night_shift_pay: bool,
}

/// Termination information in a settlement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminationRequest {
    /// Legal category of the termination.
    pub category: TerminationCategory,
    /// How the notice period was handled.
    pub notice: NoticeDisposition,
    /// Dates of a notice actually served.
    #[serde(default)]
    pub notice_override: Option<NoticeOverrideRequest>,
    /// Fully accrued vacation periods not yet taken.
    #[serde(default)]
    pub overdue_vacation_periods: i32,
}

/// Served notice dates in a settlement request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NoticeOverrideRequest {
    /// First day of the served notice.
    pub start: NaiveDate,
    /// Last day of the served notice.
    pub end: NaiveDate,
}

/// Fine flags in a settlement request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FinesRequest {
    /// Apply the Art. 467 fine on uncontested amounts.
    #[serde(default)]
    pub art_467: bool,
    /// Apply the Art. 477 late-payment fine.
    #[serde(default)]
    pub art_477: bool,
}

impl From<NoticeOverrideRequest> for NoticeOverride {
    fn from(req: NoticeOverrideRequest) -> Self {
        NoticeOverride {
            start: req.start,
            end: req.end,
        }
    }
}

impl From<SettlementRequest> for TerminationScenario {
    fn from(req: SettlementRequest) -> Self {
        TerminationScenario {
            employee_name: req.employee.name,
            employer_name: req.employer_name,
            monthly_salary: req.contract.monthly_salary,
            start_date: req.contract.start_date,
            end_date: req.contract.end_date,
            category: req.termination.category,
            notice: req.termination.notice,
            notice_override: req.termination.notice_override.map(Into::into),
            overdue_vacation_periods: req.termination.overdue_vacation_periods,
            dependents: req.employee.dependents,
            additional_hours_amount: req.contract.additional_hours_amount,
            danger_pay: req.contract.danger_pay,
            night_shift_pay: req.contract.night_shift_pay,
            fgts_balance: req.fgts_balance,
            apply_art_467_fine: req.fines.art_467,
            apply_art_477_fine: req.fines.art_477,
        }
    }
}
