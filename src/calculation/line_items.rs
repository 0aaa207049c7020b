//! Line-item assembler.
//!
//! Produces the itemized settlement statement in the conventional order:
//! salary balance, notice, 13th salary, overdue vacation, proportional
//! vacation, FGTS deposit, FGTS fine, Art. 467 fine, Art. 477 fine. Every
//! item is gated by the entitlement record; values are carried unrounded
//! between items and rounded to cents only as each item is emitted.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::StatutoryConfig;
use crate::models::{
    AuditStep, AuditWarning, DerivedState, LineItemCategory, LineItemKind, SettlementLineItem,
    TerminationCategory, TerminationScenario,
};

use super::entitlement::{Entitlement, NoticeOutcome};
use super::salary_balance::SALARY_BALANCE_CLAUSE;
use super::thirteenth_salary::THIRTEENTH_CLAUSE;
use super::vacation::{OVERDUE_VACATION_CLAUSE, VACATION_BONUS_CLAUSE, VACATION_CLAUSE};

/// Rounds a monetary value to two decimal places (half away from zero),
/// always carrying exactly two places.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("2.345").unwrap()).to_string(), "2.35");
/// assert_eq!(round_money(Decimal::from(3000)).to_string(), "3000.00");
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// The assembled line items with their audit records.
#[derive(Debug, Clone)]
pub struct LineItemsResult {
    /// Line items in statement order.
    pub line_items: Vec<SettlementLineItem>,
    /// FGTS amount the employee may withdraw, rounded to cents.
    pub fgts_withdrawable: Decimal,
    /// One audit step per emitted item, plus the FGTS access step.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings for inputs that had no effect.
    pub warnings: Vec<AuditWarning>,
}

struct Statement {
    line_items: Vec<SettlementLineItem>,
    audit_steps: Vec<AuditStep>,
    step_number: u32,
}

impl Statement {
    #[allow(clippy::too_many_arguments)]
    fn emit(
        &mut self,
        code: &str,
        description: &str,
        reference: String,
        value: Decimal,
        basis: Option<Decimal>,
        kind: LineItemKind,
        category: LineItemCategory,
        legal_basis: &str,
    ) {
        let item = SettlementLineItem {
            code: code.to_string(),
            description: description.to_string(),
            reference,
            value: round_money(value),
            basis: basis.map(round_money),
            kind,
            category,
            legal_basis: legal_basis.to_string(),
        };

        let reasoning = match basis {
            Some(basis) => format!(
                "{}: {} of R$ {} = R$ {}",
                description,
                item.reference,
                basis.normalize(),
                item.value
            ),
            None => format!("{}: {} = R$ {}", description, item.reference, item.value),
        };

        self.audit_steps.push(AuditStep {
            step_number: self.step_number,
            rule_id: code.to_string(),
            rule_name: description.to_string(),
            clause_ref: legal_basis.to_string(),
            input: serde_json::json!({
                "reference": item.reference,
                "basis": basis.map(|b| b.normalize().to_string())
            }),
            output: serde_json::json!({
                "value": item.value.to_string(),
                "kind": match kind {
                    LineItemKind::Earning => "earning",
                    LineItemKind::Deduction => "deduction",
                }
            }),
            reasoning,
        });
        self.step_number += 1;
        self.line_items.push(item);
    }
}

fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Assembles the settlement line items.
///
/// # Arguments
///
/// * `scenario` - The validated scenario
/// * `derived` - Tenure, notice and accrual quantities from earlier stages
/// * `entitlement` - The capability record for the category
/// * `notice_outcome` - The resolved notice treatment
/// * `config` - Statutory parameters
/// * `step_number` - The first audit step number to use
pub fn assemble_line_items(
    scenario: &TerminationScenario,
    derived: &DerivedState,
    entitlement: &Entitlement,
    notice_outcome: NoticeOutcome,
    config: &StatutoryConfig,
    step_number: u32,
) -> LineItemsResult {
    let accruals = config.accruals();
    let fgts = config.fgts();

    let salary = scenario.monthly_salary;
    let basis = derived.wage_basis;
    let twelve = Decimal::from(12);
    let month_days = Decimal::from(accruals.commercial_month_days);
    let bonus_divisor = Decimal::from(accruals.vacation_bonus_divisor);

    let mut statement = Statement {
        line_items: Vec::new(),
        audit_steps: Vec::new(),
        step_number,
    };
    let mut warnings = Vec::new();

    // Salary balance
    let mut salary_balance = Decimal::ZERO;
    if entitlement.salary_balance && derived.salary_balance_days > 0 {
        salary_balance = salary / month_days * Decimal::from(derived.salary_balance_days);
        statement.emit(
            "salary_balance",
            "Salary balance",
            format!("{}/{}", derived.salary_balance_days, accruals.commercial_month_days),
            salary_balance,
            Some(salary),
            LineItemKind::Earning,
            LineItemCategory::Termination,
            SALARY_BALANCE_CLAUSE,
        );
    }

    // Notice
    let mut notice_paid = Decimal::ZERO;
    match notice_outcome {
        NoticeOutcome::Paid { factor } => {
            notice_paid = basis / month_days * Decimal::from(derived.notice_days) * factor;
            let (description, reference, clause) = if factor == Decimal::ONE {
                (
                    "Indemnified notice",
                    format!("{} days", derived.notice_days),
                    config.notice().clause.as_str(),
                )
            } else {
                (
                    "Indemnified notice (half)",
                    format!("{} days x {}", derived.notice_days, percent(factor)),
                    entitlement.clause_ref,
                )
            };
            statement.emit(
                "notice_indemnified",
                description,
                reference,
                notice_paid,
                Some(basis),
                LineItemKind::Earning,
                LineItemCategory::Termination,
                clause,
            );
        }
        NoticeOutcome::Owed => {
            statement.emit(
                "notice_owed",
                "Notice not served by employee",
                format!("{} days", accruals.commercial_month_days),
                basis,
                Some(basis),
                LineItemKind::Deduction,
                LineItemCategory::Termination,
                "Art. 487 §2",
            );
        }
        NoticeOutcome::NotDue => {}
    }

    // 13th salary
    let mut thirteenth = Decimal::ZERO;
    if entitlement.thirteenth_proportional && derived.thirteenth_months > 0 {
        thirteenth = basis / twelve * Decimal::from(derived.thirteenth_months);
        statement.emit(
            "thirteenth_proportional",
            "13th salary (proportional)",
            format!("{}/12", derived.thirteenth_months),
            thirteenth,
            Some(basis),
            LineItemKind::Earning,
            LineItemCategory::ThirteenthSalary,
            THIRTEENTH_CLAUSE,
        );
    }

    // Overdue vacation
    let mut vacation_total = Decimal::ZERO;
    if entitlement.overdue_vacation && scenario.overdue_vacation_periods > 0 {
        let periods = scenario.overdue_vacation_periods;
        let overdue = basis * Decimal::from(periods);
        let bonus = overdue / bonus_divisor;
        vacation_total += overdue + bonus;

        statement.emit(
            "overdue_vacation",
            "Overdue vacation",
            format!("{} x 12/12", periods),
            overdue,
            Some(basis),
            LineItemKind::Earning,
            LineItemCategory::Vacation,
            OVERDUE_VACATION_CLAUSE,
        );
        statement.emit(
            "overdue_vacation_bonus",
            "1/3 bonus on overdue vacation",
            format!("1/{}", accruals.vacation_bonus_divisor),
            bonus,
            Some(overdue),
            LineItemKind::Earning,
            LineItemCategory::Vacation,
            VACATION_BONUS_CLAUSE,
        );
    }

    // Proportional vacation
    if entitlement.vacation_proportional && derived.vacation_months > 0 {
        let proportional = basis / twelve * Decimal::from(derived.vacation_months);
        let bonus = proportional / bonus_divisor;
        vacation_total += proportional + bonus;

        statement.emit(
            "vacation_proportional",
            "Vacation (proportional)",
            format!("{}/12", derived.vacation_months),
            proportional,
            Some(basis),
            LineItemKind::Earning,
            LineItemCategory::Vacation,
            VACATION_CLAUSE,
        );
        statement.emit(
            "vacation_proportional_bonus",
            "1/3 bonus on proportional vacation",
            format!("1/{}", accruals.vacation_bonus_divisor),
            bonus,
            Some(proportional),
            LineItemKind::Earning,
            LineItemCategory::Vacation,
            VACATION_BONUS_CLAUSE,
        );
    }

    // FGTS deposit on salary balance, paid notice and 13th salary
    let mut deposit = Decimal::ZERO;
    let fgts_incident = salary_balance + notice_paid + thirteenth;
    if entitlement.fgts_deposit && !fgts_incident.is_zero() {
        deposit = fgts_incident * fgts.deposit_rate;
        statement.emit(
            "fgts_deposit",
            "FGTS deposit on rescission amounts",
            percent(fgts.deposit_rate),
            deposit,
            Some(fgts_incident),
            LineItemKind::Earning,
            LineItemCategory::Fgts,
            "Lei 8.036/1990, Art. 15; TST Súmula 305",
        );
    }

    // FGTS fine
    let mut multa = Decimal::ZERO;
    if entitlement.fgts_multa_rate > Decimal::ZERO {
        let multa_base = scenario.fgts_balance + deposit;
        multa = multa_base * entitlement.fgts_multa_rate;
        let clause = match entitlement.category {
            TerminationCategory::MutualAgreement => "Art. 484-A, I, b",
            TerminationCategory::MutualFault => "Lei 8.036/1990, Art. 18 §2",
            _ => "Lei 8.036/1990, Art. 18 §1",
        };
        statement.emit(
            "fgts_multa",
            "FGTS fine",
            percent(entitlement.fgts_multa_rate),
            multa,
            Some(multa_base),
            LineItemKind::Earning,
            LineItemCategory::Fgts,
            clause,
        );
        if multa_base.is_zero() {
            warnings.push(AuditWarning {
                code: "FGTS_MULTA_NO_BASE".to_string(),
                message: "FGTS fine is due but the balance and deposits are zero".to_string(),
                severity: "medium".to_string(),
            });
        }
    }

    // Art. 467 fine on uncontested amounts
    if scenario.apply_art_467_fine {
        let uncontested = notice_paid + thirteenth + vacation_total;
        if uncontested.is_zero() {
            warnings.push(AuditWarning {
                code: "ART_467_NO_BASE".to_string(),
                message: "Art. 467 fine requested but no uncontested notice, 13th salary or vacation amounts are due".to_string(),
                severity: "low".to_string(),
            });
        } else {
            statement.emit(
                "art_467_fine",
                "Art. 467 fine on uncontested amounts",
                percent(config.fines().art_467_rate),
                uncontested * config.fines().art_467_rate,
                Some(uncontested),
                LineItemKind::Earning,
                LineItemCategory::Fines,
                "Art. 467",
            );
        }
    }

    // Art. 477 late-payment fine
    if scenario.apply_art_477_fine {
        statement.emit(
            "art_477_fine",
            "Art. 477 late payment fine",
            "1 salary".to_string(),
            salary,
            Some(salary),
            LineItemKind::Earning,
            LineItemCategory::Fines,
            "Art. 477 §8",
        );
    }

    let account = scenario.fgts_balance + deposit + multa;
    let fgts_withdrawable = round_money(account * entitlement.fgts_access_rate);
    statement.audit_steps.push(AuditStep {
        step_number: statement.step_number,
        rule_id: "fgts_access".to_string(),
        rule_name: "FGTS Withdrawal".to_string(),
        clause_ref: "Lei 8.036/1990, Art. 20".to_string(),
        input: serde_json::json!({
            "fgts_balance": scenario.fgts_balance.normalize().to_string(),
            "deposit": round_money(deposit).to_string(),
            "multa": round_money(multa).to_string(),
            "access_rate": entitlement.fgts_access_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "fgts_withdrawable": fgts_withdrawable.to_string()
        }),
        reasoning: format!(
            "R$ {} x {} withdrawable = R$ {}",
            round_money(account),
            percent(entitlement.fgts_access_rate),
            fgts_withdrawable
        ),
    });

    LineItemsResult {
        line_items: statement.line_items,
        fgts_withdrawable,
        audit_steps: statement.audit_steps,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::entitlement::entitlement_for;
    use crate::models::{NoticeDisposition, Tenure};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scenario(category: TerminationCategory, notice: NoticeDisposition) -> TerminationScenario {
        let mut scenario = TerminationScenario::new(
            "Maria Souza",
            dec("3000.00"),
            date(2022, 1, 1),
            date(2024, 7, 1),
            category,
            notice,
        );
        scenario.fgts_balance = dec("7200.00");
        scenario
    }

    fn derived() -> DerivedState {
        DerivedState {
            tenure: Tenure {
                years: 2,
                months: 7,
                days: 5,
            },
            notice_days: 36,
            notice_projected: true,
            projected_end_date: date(2024, 8, 6),
            wage_basis: dec("3000.00"),
            thirteenth_months: 7,
            vacation_months: 7,
            salary_balance_days: 1,
        }
    }

    fn assemble(scenario: &TerminationScenario, derived: &DerivedState) -> LineItemsResult {
        let config = StatutoryConfig::default();
        let entitlement = entitlement_for(scenario.category, &config);
        let outcome = entitlement.notice_outcome(scenario.notice);
        assemble_line_items(scenario, derived, &entitlement, outcome, &config, 1)
    }

    fn codes(result: &LineItemsResult) -> Vec<&str> {
        result.line_items.iter().map(|i| i.code.as_str()).collect()
    }

    fn value(result: &LineItemsResult, code: &str) -> Decimal {
        result
            .line_items
            .iter()
            .find(|i| i.code == code)
            .map(|i| i.value)
            .unwrap_or_else(|| panic!("missing line item {}", code))
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec("0.005")), dec("0.01"));
        assert_eq!(round_money(dec("0.0049")), dec("0.00"));
        assert_eq!(round_money(dec("-0.005")), dec("-0.01"));
        assert_eq!(round_money(dec("1")).to_string(), "1.00");
    }

    #[test]
    fn test_without_cause_statement_order_and_values() {
        let result = assemble(
            &scenario(TerminationCategory::WithoutCause, NoticeDisposition::Indemnified),
            &derived(),
        );

        assert_eq!(
            codes(&result),
            vec![
                "salary_balance",
                "notice_indemnified",
                "thirteenth_proportional",
                "vacation_proportional",
                "vacation_proportional_bonus",
                "fgts_deposit",
                "fgts_multa",
            ]
        );
        assert_eq!(value(&result, "salary_balance"), dec("100.00"));
        assert_eq!(value(&result, "notice_indemnified"), dec("3600.00"));
        assert_eq!(value(&result, "thirteenth_proportional"), dec("1750.00"));
        assert_eq!(value(&result, "vacation_proportional"), dec("1750.00"));
        assert_eq!(value(&result, "vacation_proportional_bonus"), dec("583.33"));
        // (100 + 3600 + 1750) x 8%
        assert_eq!(value(&result, "fgts_deposit"), dec("436.00"));
        // (7200 + 436) x 40%
        assert_eq!(value(&result, "fgts_multa"), dec("3054.40"));
        assert_eq!(result.fgts_withdrawable, dec("10690.40"));
    }

    #[test]
    fn test_every_item_has_an_audit_step() {
        let result = assemble(
            &scenario(TerminationCategory::WithoutCause, NoticeDisposition::Indemnified),
            &derived(),
        );

        assert_eq!(result.audit_steps.len(), result.line_items.len() + 1);
        for (item, step) in result.line_items.iter().zip(&result.audit_steps) {
            assert_eq!(item.code, step.rule_id);
            assert_eq!(item.legal_basis, step.clause_ref);
            assert!(step.reasoning.contains(&format!("R$ {}", item.value)));
        }
        assert_eq!(result.audit_steps.last().unwrap().rule_id, "fgts_access");
    }

    #[test]
    fn test_values_carry_two_decimal_places() {
        let result = assemble(
            &scenario(TerminationCategory::WithoutCause, NoticeDisposition::Indemnified),
            &derived(),
        );
        for item in &result.line_items {
            assert_eq!(item.value.scale(), 2, "{} has scale {}", item.code, item.value.scale());
        }
    }

    #[test]
    fn test_resignation_unserved_notice_is_a_deduction() {
        let mut d = derived();
        d.notice_projected = false;
        d.thirteenth_months = 7;
        d.vacation_months = 6;
        let result = assemble(
            &scenario(TerminationCategory::Resignation, NoticeDisposition::Indemnified),
            &d,
        );

        let owed = result
            .line_items
            .iter()
            .find(|i| i.code == "notice_owed")
            .unwrap();
        assert_eq!(owed.kind, LineItemKind::Deduction);
        assert_eq!(owed.value, dec("3000.00"));
        assert_eq!(owed.value.scale(), 2);
        assert!(!codes(&result).contains(&"fgts_multa"));
        assert_eq!(result.fgts_withdrawable, dec("0.00"));
    }

    #[test]
    fn test_for_cause_only_balance_overdue_and_deposit() {
        let mut s = scenario(TerminationCategory::ForCause, NoticeDisposition::Worked);
        s.overdue_vacation_periods = 1;
        let result = assemble(&s, &derived());

        assert_eq!(
            codes(&result),
            vec![
                "salary_balance",
                "overdue_vacation",
                "overdue_vacation_bonus",
                "fgts_deposit",
            ]
        );
        assert_eq!(value(&result, "overdue_vacation"), dec("3000.00"));
        assert_eq!(value(&result, "overdue_vacation_bonus"), dec("1000.00"));
        assert_eq!(value(&result, "fgts_deposit"), dec("8.00"));
    }

    #[test]
    fn test_mutual_agreement_halves_notice_and_fine() {
        let result = assemble(
            &scenario(TerminationCategory::MutualAgreement, NoticeDisposition::Indemnified),
            &derived(),
        );

        assert_eq!(value(&result, "notice_indemnified"), dec("1800.00"));
        let multa = result
            .line_items
            .iter()
            .find(|i| i.code == "fgts_multa")
            .unwrap();
        assert_eq!(multa.reference, "20%");
        assert_eq!(multa.legal_basis, "Art. 484-A, I, b");
        // (100 + 1800 + 1750) x 8% = 292; (7200 + 292) x 20% = 1498.40
        assert_eq!(multa.value, dec("1498.40"));
        // (7200 + 292 + 1498.40) x 50%
        assert_eq!(result.fgts_withdrawable, dec("4495.20"));
    }

    #[test]
    fn test_fines_follow_caller_flags() {
        let mut s = scenario(TerminationCategory::WithoutCause, NoticeDisposition::Indemnified);
        s.apply_art_467_fine = true;
        s.apply_art_477_fine = true;
        let result = assemble(&s, &derived());

        let tail: Vec<&str> = codes(&result).into_iter().rev().take(2).collect();
        assert_eq!(tail, vec!["art_477_fine", "art_467_fine"]);
        // 3600 + 1750 + 1750 + 583.333...
        assert_eq!(value(&result, "art_467_fine"), dec("7683.33"));
        assert_eq!(value(&result, "art_477_fine"), dec("3000.00"));
    }

    #[test]
    fn test_art_467_without_base_warns() {
        let mut s = scenario(TerminationCategory::ForCause, NoticeDisposition::Worked);
        s.apply_art_467_fine = true;
        let result = assemble(&s, &derived());

        assert!(!codes(&result).contains(&"art_467_fine"));
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "ART_467_NO_BASE");
    }

    #[test]
    fn test_worked_notice_has_no_notice_item() {
        let mut d = derived();
        d.notice_projected = false;
        let result = assemble(
            &scenario(TerminationCategory::WithoutCause, NoticeDisposition::Worked),
            &d,
        );
        assert!(!codes(&result).contains(&"notice_indemnified"));
        assert!(codes(&result).contains(&"fgts_multa"));
    }
}
