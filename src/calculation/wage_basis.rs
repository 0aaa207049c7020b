//! Wage basis used for notice, 13th salary and vacation.
//!
//! Habitual supplements integrate the remuneration, so the basis is the
//! nominal salary plus the monthly overtime amount and the percentage
//! supplements the employee receives.

use rust_decimal::Decimal;

use crate::config::SupplementRules;
use crate::models::{AuditStep, TerminationScenario};

/// The result of the wage basis calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct WageBasisResult {
    /// Nominal salary plus habitual supplements.
    pub wage_basis: Decimal,
    /// Danger pay included in the basis.
    pub danger_pay: Decimal,
    /// Night-shift supplement included in the basis.
    pub night_shift_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly wage basis for a scenario.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_wage_basis;
/// use settlement_engine::config::StatutoryConfig;
/// use settlement_engine::models::{NoticeDisposition, TerminationCategory, TerminationScenario};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut scenario = TerminationScenario::new(
///     "Maria Souza",
///     Decimal::new(200000, 2),
///     NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     TerminationCategory::WithoutCause,
///     NoticeDisposition::Indemnified,
/// );
/// scenario.danger_pay = true;
///
/// let config = StatutoryConfig::default();
/// let result = calculate_wage_basis(&scenario, config.supplements(), 1);
/// assert_eq!(result.wage_basis, Decimal::new(260000, 2));
/// ```
pub fn calculate_wage_basis(
    scenario: &TerminationScenario,
    rules: &SupplementRules,
    step_number: u32,
) -> WageBasisResult {
    let salary = scenario.monthly_salary;

    let danger_pay = if scenario.danger_pay {
        salary * rules.danger_pay_rate
    } else {
        Decimal::ZERO
    };
    let night_shift_pay = if scenario.night_shift_pay {
        salary * rules.night_shift_rate
    } else {
        Decimal::ZERO
    };

    let wage_basis = salary + scenario.additional_hours_amount + danger_pay + night_shift_pay;

    let audit_step = AuditStep {
        step_number,
        rule_id: "wage_basis".to_string(),
        rule_name: "Wage Basis".to_string(),
        clause_ref: "Art. 457 §1; Art. 193 §1; Art. 73".to_string(),
        input: serde_json::json!({
            "monthly_salary": salary.normalize().to_string(),
            "additional_hours_amount": scenario.additional_hours_amount.normalize().to_string(),
            "danger_pay": scenario.danger_pay,
            "night_shift_pay": scenario.night_shift_pay
        }),
        output: serde_json::json!({
            "danger_pay_amount": danger_pay.normalize().to_string(),
            "night_shift_amount": night_shift_pay.normalize().to_string(),
            "wage_basis": wage_basis.normalize().to_string()
        }),
        reasoning: format!(
            "R$ {} + R$ {} overtime + R$ {} danger pay + R$ {} night shift = R$ {}",
            salary.normalize(),
            scenario.additional_hours_amount.normalize(),
            danger_pay.normalize(),
            night_shift_pay.normalize(),
            wage_basis.normalize()
        ),
    };

    WageBasisResult {
        wage_basis,
        danger_pay,
        night_shift_pay,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatutoryConfig;
    use crate::models::{NoticeDisposition, TerminationCategory};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_scenario(salary: &str) -> TerminationScenario {
        TerminationScenario::new(
            "Maria Souza",
            dec(salary),
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            TerminationCategory::WithoutCause,
            NoticeDisposition::Indemnified,
        )
    }

    fn rules() -> SupplementRules {
        StatutoryConfig::default().supplements().clone()
    }

    #[test]
    fn test_plain_salary_is_basis() {
        let result = calculate_wage_basis(&create_scenario("3000.00"), &rules(), 1);
        assert_eq!(result.wage_basis, dec("3000.00"));
        assert_eq!(result.danger_pay, Decimal::ZERO);
        assert_eq!(result.audit_step.output["wage_basis"], "3000");
    }

    #[test]
    fn test_all_supplements_fold_into_basis() {
        let mut scenario = create_scenario("2000.00");
        scenario.additional_hours_amount = dec("350.00");
        scenario.danger_pay = true;
        scenario.night_shift_pay = true;

        let result = calculate_wage_basis(&scenario, &rules(), 2);

        // 2000 + 350 + 600 + 400
        assert_eq!(result.wage_basis, dec("3350.00"));
        assert_eq!(result.danger_pay, dec("600.00"));
        assert_eq!(result.night_shift_pay, dec("400.00"));
        assert_eq!(result.audit_step.step_number, 2);
        assert!(result.audit_step.reasoning.contains("= R$ 3350"));
    }

    #[test]
    fn test_zero_salary_with_overtime() {
        let mut scenario = create_scenario("0");
        scenario.additional_hours_amount = dec("120.00");
        scenario.danger_pay = true;

        let result = calculate_wage_basis(&scenario, &rules(), 1);
        assert_eq!(result.wage_basis, dec("120.00"));
    }
}
