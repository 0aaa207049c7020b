//! Settlement pipeline.
//!
//! Runs the stages in order: validation, entitlement, date resolution, wage
//! basis, accrual counts, line items, totals. Each stage reads the scenario
//! and the state built so far and appends its audit steps; the scenario is
//! never mutated.

use tracing::debug;

use crate::config::StatutoryConfig;
use crate::error::EngineResult;
use crate::models::{AuditTrace, DerivedState, SettlementResult, TerminationScenario};

use super::aggregator::aggregate_line_items;
use super::date_resolution::resolve_dates;
use super::entitlement::{NoticeOutcome, determine_entitlement};
use super::line_items::assemble_line_items;
use super::salary_balance::calculate_salary_balance_days;
use super::thirteenth_salary::calculate_thirteenth_months;
use super::vacation::calculate_vacation_months;
use super::validation::validate_scenario;
use super::wage_basis::calculate_wage_basis;

/// Computes the settlement for a scenario using the built-in CLT parameters.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::compute;
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
///
/// let result = compute(&scenario).unwrap();
/// assert_eq!(result.notice_days, 36);
/// assert_eq!(result.item("notice_indemnified").unwrap().value, Decimal::new(360000, 2));
/// ```
///
/// # Errors
///
/// Returns a validation error if the scenario is rejected; no partial result
/// is ever produced.
pub fn compute(scenario: &TerminationScenario) -> EngineResult<SettlementResult> {
    compute_with_config(scenario, StatutoryConfig::builtin())
}

/// Computes the settlement for a scenario with explicit statutory parameters.
///
/// # Errors
///
/// Returns `InvalidConfig` if the parameters fail
/// [`StatutoryConfig::validate`], or a validation error if the scenario is
/// rejected.
pub fn compute_with_config(
    scenario: &TerminationScenario,
    config: &StatutoryConfig,
) -> EngineResult<SettlementResult> {
    config.validate()?;
    validate_scenario(scenario)?;

    let mut steps = Vec::new();
    let mut step_number: u32 = 1;

    let entitlement = determine_entitlement(scenario.category, scenario.notice, config, step_number);
    steps.push(entitlement.audit_step);
    step_number += 1;

    let projects_notice = matches!(entitlement.notice_outcome, NoticeOutcome::Paid { .. });
    let dates = resolve_dates(scenario, config.notice(), projects_notice, step_number)?;
    step_number += dates.audit_steps.len() as u32;
    steps.extend(dates.audit_steps);
    debug!(
        tenure = %dates.tenure,
        notice_days = dates.notice_days,
        projected_end_date = %dates.projected_end_date,
        "Resolved dates"
    );

    let wage_basis = calculate_wage_basis(scenario, config.supplements(), step_number);
    steps.push(wage_basis.audit_step);
    step_number += 1;

    let accruals = config.accruals();
    let salary_balance = calculate_salary_balance_days(
        scenario.start_date,
        scenario.end_date,
        accruals.commercial_month_days,
        step_number,
    );
    steps.push(salary_balance.audit_step);
    step_number += 1;

    let thirteenth = calculate_thirteenth_months(
        scenario.start_date,
        scenario.end_date,
        dates.projected_end_date,
        accruals.min_days_per_month,
        step_number,
    );
    steps.push(thirteenth.audit_step);
    step_number += 1;

    let vacation = calculate_vacation_months(
        scenario.start_date,
        dates.projected_end_date,
        accruals.min_days_per_month,
        step_number,
    );
    steps.push(vacation.audit_step);
    step_number += 1;

    let derived = DerivedState {
        tenure: dates.tenure,
        notice_days: dates.notice_days,
        notice_projected: dates.notice_projected,
        projected_end_date: dates.projected_end_date,
        wage_basis: wage_basis.wage_basis,
        thirteenth_months: thirteenth.months,
        vacation_months: vacation.months,
        salary_balance_days: salary_balance.days,
    };

    let assembled = assemble_line_items(
        scenario,
        &derived,
        &entitlement.entitlement,
        entitlement.notice_outcome,
        config,
        step_number,
    );
    step_number += assembled.audit_steps.len() as u32;
    steps.extend(assembled.audit_steps);

    let aggregation = aggregate_line_items(&assembled.line_items, step_number);
    steps.push(aggregation.audit_step);
    let totals = aggregation.totals;

    debug!(
        category = %scenario.category,
        line_items = assembled.line_items.len(),
        net_total = %totals.net_total,
        warnings = assembled.warnings.len(),
        "Settlement computed"
    );

    Ok(SettlementResult {
        employee_name: scenario.employee_name.clone(),
        employer_name: scenario.employer_name.clone(),
        dependents: scenario.dependents,
        category: scenario.category,
        notice: scenario.notice,
        tenure: derived.tenure,
        projected_end_date: derived.projected_end_date,
        notice_days: derived.notice_days,
        statutory_notice_days: dates.statutory_notice_days,
        line_items: assembled.line_items,
        total_earnings: totals.total_earnings,
        total_deductions: totals.total_deductions,
        net_total: totals.net_total,
        fgts_withdrawable: assembled.fgts_withdrawable,
        audit_trace: AuditTrace {
            steps,
            warnings: assembled.warnings,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{LineItemKind, NoticeDisposition, TerminationCategory};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scenario(category: TerminationCategory, notice: NoticeDisposition) -> TerminationScenario {
        TerminationScenario::new(
            "Maria Souza",
            dec("3000.00"),
            date(2022, 1, 1),
            date(2024, 7, 1),
            category,
            notice,
        )
    }

    #[test]
    fn test_without_cause_indemnified() {
        let result = compute(&scenario(
            TerminationCategory::WithoutCause,
            NoticeDisposition::Indemnified,
        ))
        .unwrap();

        assert_eq!(result.notice_days, 36);
        assert_eq!(result.projected_end_date, date(2024, 8, 6));
        assert_eq!(result.item("notice_indemnified").unwrap().value, dec("3600.00"));
        assert_eq!(result.item("thirteenth_proportional").unwrap().value, dec("1750.00"));
        assert_eq!(result.item("vacation_proportional").unwrap().value, dec("1750.00"));
        assert_eq!(result.item("vacation_proportional_bonus").unwrap().value, dec("583.33"));
    }

    #[test]
    fn test_totals_reconcile_with_items() {
        let result = compute(&scenario(
            TerminationCategory::Resignation,
            NoticeDisposition::Indemnified,
        ))
        .unwrap();

        let earnings: Decimal = result
            .line_items
            .iter()
            .filter(|i| i.kind == LineItemKind::Earning)
            .map(|i| i.value)
            .sum();
        let deductions: Decimal = result
            .line_items
            .iter()
            .filter(|i| i.kind == LineItemKind::Deduction)
            .map(|i| i.value)
            .sum();

        assert_eq!(result.total_earnings, earnings);
        assert_eq!(result.total_deductions, deductions);
        assert_eq!(result.net_total, earnings - deductions);
        assert_eq!(result.total_deductions, dec("3000.00"));
    }

    #[test]
    fn test_audit_steps_are_numbered_from_one() {
        let result = compute(&scenario(
            TerminationCategory::WithoutCause,
            NoticeDisposition::Indemnified,
        ))
        .unwrap();

        let steps = &result.audit_trace.steps;
        assert_eq!(steps[0].rule_id, "entitlement_matrix");
        assert_eq!(steps.last().unwrap().rule_id, "settlement_totals");
        for (index, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, index as u32 + 1);
        }
    }

    #[test]
    fn test_rejected_scenario_yields_no_result() {
        let mut s = scenario(TerminationCategory::ForCause, NoticeDisposition::Indemnified);
        s.monthly_salary = dec("5000.00");
        assert!(matches!(
            compute(&s),
            Err(EngineError::UnsupportedCategoryNoticeCombination { .. })
        ));
    }

    #[test]
    fn test_custom_config_changes_art_467_rate() {
        let defaults = StatutoryConfig::default();
        let mut parameters = defaults.parameters().clone();
        parameters.fines.art_467_rate = dec("0.50");
        let config = StatutoryConfig::new(defaults.statute().clone(), parameters);

        let mut s = scenario(TerminationCategory::WithoutCause, NoticeDisposition::Indemnified);
        s.apply_art_467_fine = true;

        let result = compute_with_config(&s, &config).unwrap();
        // (3600 + 1750 + 1750 + 583.33...) x 50%
        assert_eq!(result.item("art_467_fine").unwrap().value, dec("3841.67"));
    }

    #[test]
    fn test_invalid_config_is_rejected_before_calculation() {
        let defaults = StatutoryConfig::default();
        let mut parameters = defaults.parameters().clone();
        parameters.accruals.commercial_month_days = 0;
        let config = StatutoryConfig::new(defaults.statute().clone(), parameters);

        let s = scenario(TerminationCategory::WithoutCause, NoticeDisposition::Indemnified);
        assert!(matches!(
            compute_with_config(&s, &config),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_oversized_salary_is_rejected_not_overflowed() {
        let mut s = scenario(TerminationCategory::WithoutCause, NoticeDisposition::Indemnified);
        s.monthly_salary = dec("70000000000000000000000000000");
        s.danger_pay = true;
        s.night_shift_pay = true;

        match compute(&s) {
            Err(EngineError::InvalidAmount { field, .. }) => assert_eq!(field, "monthly_salary"),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_largest_accepted_amounts_compute() {
        let mut s = scenario(TerminationCategory::WithoutCause, NoticeDisposition::Indemnified);
        s.monthly_salary = crate::calculation::MAX_AMOUNT;
        s.additional_hours_amount = crate::calculation::MAX_AMOUNT;
        s.fgts_balance = crate::calculation::MAX_AMOUNT;
        s.danger_pay = true;
        s.night_shift_pay = true;
        s.overdue_vacation_periods = 40;
        s.apply_art_467_fine = true;
        s.apply_art_477_fine = true;

        let result = compute(&s).unwrap();
        assert!(result.net_total > Decimal::ZERO);
    }

    #[test]
    fn test_december_notice_projected_into_january() {
        let mut s = scenario(TerminationCategory::WithoutCause, NoticeDisposition::Indemnified);
        s.start_date = date(2020, 1, 1);
        s.end_date = date(2023, 12, 10);

        let result = compute(&s).unwrap();
        assert_eq!(result.notice_days, 42);
        assert_eq!(result.projected_end_date, date(2024, 1, 21));
        let thirteenth = result.item("thirteenth_proportional").unwrap();
        assert_eq!(thirteenth.reference, "13/12");
        // 13 x 3000 / 12
        assert_eq!(thirteenth.value, dec("3250.00"));
    }

    #[test]
    fn test_resignation_waived_notice_is_deducted() {
        let result = compute(&scenario(
            TerminationCategory::Resignation,
            NoticeDisposition::Waived,
        ))
        .unwrap();

        let owed = result.item("notice_owed").unwrap();
        assert_eq!(owed.kind, LineItemKind::Deduction);
        assert_eq!(owed.value, dec("3000.00"));
        assert_eq!(result.total_deductions, dec("3000.00"));
        assert_eq!(result.projected_end_date, date(2024, 7, 1));
    }

    #[test]
    fn test_same_scenario_same_result() {
        let s = scenario(TerminationCategory::MutualAgreement, NoticeDisposition::Indemnified);
        assert_eq!(compute(&s).unwrap(), compute(&s).unwrap());
    }
}
