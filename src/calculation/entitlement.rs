//! Entitlement matrix.
//!
//! Each termination category maps to a capability record deciding which line
//! items are legally due and with what multiplier. The assembler consults
//! this record before emitting anything; no item is included by default.
//!
//! | Category        | Notice                      | 13th | Vacation prop. | FGTS fine | FGTS access |
//! |-----------------|-----------------------------|------|----------------|-----------|-------------|
//! | WithoutCause    | paid, projected             | yes  | yes            | 40%       | full        |
//! | Resignation     | owed by employee if unserved| yes  | yes            | none      | none        |
//! | ForCause        | none                        | no   | overdue only   | none      | none        |
//! | MutualFault     | half                        | yes  | yes            | 20%       | full        |
//! | MutualAgreement | half                        | yes  | yes            | 20%       | half        |

use rust_decimal::Decimal;

use crate::config::StatutoryConfig;
use crate::models::{AuditStep, NoticeDisposition, TerminationCategory};

/// Who bears the notice period for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeEntitlement {
    /// No notice is due either way.
    None,
    /// The employer pays the notice, scaled by `factor`.
    EmployerPays {
        /// Share of the notice value due (1 or 1/2).
        factor: Decimal,
    },
    /// The employee owes the notice if it was not served.
    EmployeeOwes,
}

/// How the notice resolves once the disposition is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeOutcome {
    /// No notice line item.
    NotDue,
    /// Notice paid to the employee; the contract end date is projected.
    Paid {
        /// Share of the notice value due.
        factor: Decimal,
    },
    /// One month's wage basis withheld from the employee.
    Owed,
}

/// The capability record for a termination category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entitlement {
    /// The category this record describes.
    pub category: TerminationCategory,
    /// Salary balance for days worked in the final month.
    pub salary_balance: bool,
    /// Notice treatment.
    pub notice: NoticeEntitlement,
    /// Proportional 13th salary.
    pub thirteenth_proportional: bool,
    /// Proportional vacation with bonus.
    pub vacation_proportional: bool,
    /// Overdue vacation periods with bonus.
    pub overdue_vacation: bool,
    /// FGTS deposit on rescission amounts.
    pub fgts_deposit: bool,
    /// FGTS fine rate (zero when none is due).
    pub fgts_multa_rate: Decimal,
    /// Share of the FGTS account the employee may withdraw.
    pub fgts_access_rate: Decimal,
    /// Statutory reference for the category.
    pub clause_ref: &'static str,
}

impl Entitlement {
    /// Resolves the notice treatment for a disposition.
    ///
    /// Employer-paid notice is due when it was indemnified or waived by the
    /// employer, never when it was worked. Employee-owed notice is withheld
    /// whenever it was not served.
    pub fn notice_outcome(&self, disposition: NoticeDisposition) -> NoticeOutcome {
        match (self.notice, disposition) {
            (NoticeEntitlement::EmployerPays { factor }, NoticeDisposition::Indemnified)
            | (NoticeEntitlement::EmployerPays { factor }, NoticeDisposition::Waived) => {
                NoticeOutcome::Paid { factor }
            }
            (NoticeEntitlement::EmployeeOwes, NoticeDisposition::Indemnified)
            | (NoticeEntitlement::EmployeeOwes, NoticeDisposition::Waived) => NoticeOutcome::Owed,
            _ => NoticeOutcome::NotDue,
        }
    }
}

/// Returns the capability record for a termination category.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::{entitlement_for, NoticeEntitlement};
/// use settlement_engine::config::StatutoryConfig;
/// use settlement_engine::models::TerminationCategory;
///
/// let entitlement = entitlement_for(TerminationCategory::ForCause, &StatutoryConfig::default());
/// assert_eq!(entitlement.notice, NoticeEntitlement::None);
/// assert!(!entitlement.thirteenth_proportional);
/// assert!(entitlement.overdue_vacation);
/// ```
pub fn entitlement_for(category: TerminationCategory, config: &StatutoryConfig) -> Entitlement {
    let fgts = config.fgts();
    let half = Decimal::new(5, 1);

    match category {
        TerminationCategory::WithoutCause => Entitlement {
            category,
            salary_balance: true,
            notice: NoticeEntitlement::EmployerPays {
                factor: Decimal::ONE,
            },
            thirteenth_proportional: true,
            vacation_proportional: true,
            overdue_vacation: true,
            fgts_deposit: true,
            fgts_multa_rate: fgts.full_multa_rate,
            fgts_access_rate: Decimal::ONE,
            clause_ref: "Art. 477; Lei 8.036/1990, Art. 18 §1",
        },
        TerminationCategory::Resignation => Entitlement {
            category,
            salary_balance: true,
            notice: NoticeEntitlement::EmployeeOwes,
            thirteenth_proportional: true,
            vacation_proportional: true,
            overdue_vacation: true,
            fgts_deposit: true,
            fgts_multa_rate: Decimal::ZERO,
            fgts_access_rate: Decimal::ZERO,
            clause_ref: "Art. 487 §2; TST Súmula 261",
        },
        TerminationCategory::ForCause => Entitlement {
            category,
            salary_balance: true,
            notice: NoticeEntitlement::None,
            thirteenth_proportional: false,
            vacation_proportional: false,
            overdue_vacation: true,
            fgts_deposit: true,
            fgts_multa_rate: Decimal::ZERO,
            fgts_access_rate: Decimal::ZERO,
            clause_ref: "Art. 482; Art. 146",
        },
        TerminationCategory::MutualFault => Entitlement {
            category,
            salary_balance: true,
            notice: NoticeEntitlement::EmployerPays { factor: half },
            thirteenth_proportional: true,
            vacation_proportional: true,
            overdue_vacation: true,
            fgts_deposit: true,
            fgts_multa_rate: fgts.reduced_multa_rate,
            fgts_access_rate: Decimal::ONE,
            clause_ref: "Art. 484; Lei 8.036/1990, Art. 18 §2",
        },
        TerminationCategory::MutualAgreement => Entitlement {
            category,
            salary_balance: true,
            notice: NoticeEntitlement::EmployerPays { factor: half },
            thirteenth_proportional: true,
            vacation_proportional: true,
            overdue_vacation: true,
            fgts_deposit: true,
            fgts_multa_rate: fgts.reduced_multa_rate,
            fgts_access_rate: fgts.partial_withdrawal_rate,
            clause_ref: "Art. 484-A",
        },
    }
}

/// The entitlement record together with the audit step recording it.
#[derive(Debug, Clone)]
pub struct EntitlementResult {
    /// The capability record for the category.
    pub entitlement: Entitlement,
    /// The resolved notice treatment.
    pub notice_outcome: NoticeOutcome,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Determines the entitlements for a category and notice disposition.
pub fn determine_entitlement(
    category: TerminationCategory,
    disposition: NoticeDisposition,
    config: &StatutoryConfig,
    step_number: u32,
) -> EntitlementResult {
    let entitlement = entitlement_for(category, config);
    let notice_outcome = entitlement.notice_outcome(disposition);

    let notice_str = match notice_outcome {
        NoticeOutcome::NotDue => "not_due".to_string(),
        NoticeOutcome::Paid { factor } => format!("paid x {}", factor.normalize()),
        NoticeOutcome::Owed => "owed_by_employee".to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "entitlement_matrix".to_string(),
        rule_name: "Entitlement Matrix".to_string(),
        clause_ref: entitlement.clause_ref.to_string(),
        input: serde_json::json!({
            "category": category.as_str(),
            "notice": disposition.as_str()
        }),
        output: serde_json::json!({
            "notice": notice_str,
            "thirteenth_proportional": entitlement.thirteenth_proportional,
            "vacation_proportional": entitlement.vacation_proportional,
            "overdue_vacation": entitlement.overdue_vacation,
            "fgts_multa_rate": entitlement.fgts_multa_rate.normalize().to_string(),
            "fgts_access_rate": entitlement.fgts_access_rate.normalize().to_string()
        }),
        reasoning: format!(
            "Category '{}' with {} notice: notice {}, FGTS fine {}%",
            category,
            disposition,
            notice_str,
            (entitlement.fgts_multa_rate * Decimal::ONE_HUNDRED).normalize()
        ),
    };

    EntitlementResult {
        entitlement,
        notice_outcome,
        audit_step,
    }
}
