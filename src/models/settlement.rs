//! Settlement result models for the Termination Settlement Engine.
//!
//! This module contains the [`SettlementResult`] type and its associated
//! structures that capture all outputs of a calculation: the ordered line
//! items, their totals, and an audit trace explaining every rule applied.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{NoticeDisposition, TerminationCategory, Tenure};

/// Whether a line item is paid to or withheld from the employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    /// An amount owed to the employee.
    Earning,
    /// An amount withheld from the employee.
    Deduction,
}

/// The statement section a line item belongs to.
///
/// # Example
///
/// ```
/// use settlement_engine::models::LineItemCategory;
///
/// let category = LineItemCategory::ThirteenthSalary;
/// assert_eq!(serde_json::to_string(&category).unwrap(), "\"thirteenth_salary\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemCategory {
    /// Salary balance and notice.
    Termination,
    /// Overdue and proportional vacation with bonus.
    Vacation,
    /// Proportional 13th salary.
    ThirteenthSalary,
    /// FGTS deposits and fines.
    Fgts,
    /// Statutory fines.
    Fines,
    /// Anything else.
    Other,
}

/// A single line of the settlement statement.
///
/// # Example
///
/// ```
/// use settlement_engine::models::{LineItemCategory, LineItemKind, SettlementLineItem};
/// use rust_decimal::Decimal;
///
/// let item = SettlementLineItem {
///     code: "thirteenth_proportional".to_string(),
///     description: "13th salary (proportional)".to_string(),
///     reference: "7/12".to_string(),
///     value: Decimal::new(175000, 2),
///     basis: Some(Decimal::new(300000, 2)),
///     kind: LineItemKind::Earning,
///     category: LineItemCategory::ThirteenthSalary,
///     legal_basis: "Lei 4.090/1962, Art. 3".to_string(),
/// };
/// assert!(item.is_earning());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementLineItem {
    /// Stable identifier of the item (e.g., "notice_indemnified").
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// Quantity reference such as "7/12" or "36 days".
    pub reference: String,
    /// Monetary value, rounded to two decimal places.
    pub value: Decimal,
    /// The amount the fraction or rate was applied to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis: Option<Decimal>,
    /// Earning or deduction.
    pub kind: LineItemKind,
    /// Statement section.
    pub category: LineItemCategory,
    /// Statutory reference that justifies the item.
    pub legal_basis: String,
}

impl SettlementLineItem {
    /// Returns true if the item is paid to the employee.
    pub fn is_earning(&self) -> bool {
        self.kind == LineItemKind::Earning
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Statutory reference for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs that were accepted but had no effect, such as a fine
/// requested with nothing to apply it to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a settlement calculation.
///
/// Constructed once per call and never persisted. Identical scenarios always
/// produce identical results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// Employee display name, passed through from the scenario.
    pub employee_name: String,
    /// Employer display name, passed through from the scenario.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_name: Option<String>,
    /// Dependents, passed through for downstream tax use.
    pub dependents: u32,
    /// The termination category that was applied.
    pub category: TerminationCategory,
    /// The notice disposition that was applied.
    pub notice: NoticeDisposition,
    /// Service time up to the projected end date.
    pub tenure: Tenure,
    /// The contract end date used for accruals.
    pub projected_end_date: NaiveDate,
    /// The resolved notice length in days: the served length when explicit
    /// notice dates were given, otherwise the statutory length.
    pub notice_days: u32,
    /// The statutory notice length for the tenure, between the base and the
    /// maximum notice days.
    pub statutory_notice_days: u32,
    /// Line items in statement order.
    pub line_items: Vec<SettlementLineItem>,
    /// Sum of all earning items.
    pub total_earnings: Decimal,
    /// Sum of all deduction items.
    pub total_deductions: Decimal,
    /// `total_earnings - total_deductions`.
    pub net_total: Decimal,
    /// FGTS amount the employee may withdraw after termination.
    pub fgts_withdrawable: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl SettlementResult {
    /// Returns the first line item with the given code.
    pub fn item(&self, code: &str) -> Option<&SettlementLineItem> {
        self.line_items.iter().find(|item| item.code == code)
    }

    /// Returns all line items in a statement section.
    pub fn items_in(&self, category: LineItemCategory) -> impl Iterator<Item = &SettlementLineItem> {
        self.line_items
            .iter()
            .filter(move |item| item.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_item(code: &str, value: &str, kind: LineItemKind) -> SettlementLineItem {
        SettlementLineItem {
            code: code.to_string(),
            description: code.to_string(),
            reference: "1/12".to_string(),
            value: dec(value),
            basis: None,
            kind,
            category: LineItemCategory::Termination,
            legal_basis: "Art. 477".to_string(),
        }
    }

    fn create_result(line_items: Vec<SettlementLineItem>) -> SettlementResult {
        SettlementResult {
            employee_name: "Maria Souza".to_string(),
            employer_name: None,
            dependents: 0,
            category: TerminationCategory::WithoutCause,
            notice: NoticeDisposition::Indemnified,
            tenure: Tenure::default(),
            projected_end_date: NaiveDate::from_ymd_opt(2024, 8, 6).unwrap(),
            notice_days: 36,
            statutory_notice_days: 36,
            line_items,
            total_earnings: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            net_total: Decimal::ZERO,
            fgts_withdrawable: Decimal::ZERO,
            audit_trace: AuditTrace::default(),
        }
    }

    #[test]
    fn test_line_item_serializes_value_as_string() {
        let item = create_item("salary_balance", "1500.00", LineItemKind::Earning);
        let json = serde_json::to_string(&item).unwrap();

        assert!(json.contains("\"value\":\"1500.00\""));
        assert!(json.contains("\"kind\":\"earning\""));
        assert!(json.contains("\"category\":\"termination\""));
        assert!(!json.contains("\"basis\""));
    }

    #[test]
    fn test_line_item_deserialization() {
        let json = r#"{
            "code": "notice_owed",
            "description": "Notice not served",
            "reference": "30 days",
            "value": "3000.00",
            "basis": "3000.00",
            "kind": "deduction",
            "category": "termination",
            "legal_basis": "Art. 487 §2"
        }"#;

        let item: SettlementLineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, LineItemKind::Deduction);
        assert_eq!(item.basis, Some(dec("3000.00")));
        assert!(!item.is_earning());
    }

    #[test]
    fn test_item_lookup_by_code() {
        let result = create_result(vec![
            create_item("salary_balance", "100.00", LineItemKind::Earning),
            create_item("notice_indemnified", "3600.00", LineItemKind::Earning),
        ]);

        assert_eq!(result.item("notice_indemnified").unwrap().value, dec("3600.00"));
        assert!(result.item("fgts_multa").is_none());
        assert_eq!(result.items_in(LineItemCategory::Termination).count(), 2);
        assert_eq!(result.items_in(LineItemCategory::Fgts).count(), 0);
    }

    #[test]
    fn test_result_serialization_has_no_clock_fields() {
        let result = create_result(vec![]);
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains("\"projected_end_date\":\"2024-08-06\""));
        assert!(json.contains("\"notice_days\":36"));
        assert!(!json.contains("timestamp"));
        assert!(!json.contains("employer_name"));
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "ART_467_NO_BASE".to_string(),
            message: "No uncontested amounts".to_string(),
            severity: "low".to_string(),
        };

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"ART_467_NO_BASE\""));
        assert!(json.contains("\"severity\":\"low\""));
    }
}
