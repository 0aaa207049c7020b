//! Notice-period (aviso prévio) length.
//!
//! The statutory notice is a base number of days plus a fixed increment per
//! completed year of service, capped at a maximum. With the CLT parameters
//! that is 30 days + 3 per year, up to 90 days.

use crate::config::NoticeRules;
use crate::models::{AuditStep, Tenure};

/// The result of the notice-length rule, including the days and audit step.
#[derive(Debug, Clone)]
pub struct NoticePeriodResult {
    /// Statutory notice length in days.
    pub days: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the notice length for a number of completed years of service.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::notice_days_for_years;
/// use settlement_engine::config::StatutoryConfig;
///
/// let rules = StatutoryConfig::default().notice().clone();
/// assert_eq!(notice_days_for_years(0, &rules), 30);
/// assert_eq!(notice_days_for_years(2, &rules), 36);
/// assert_eq!(notice_days_for_years(25, &rules), 90);
/// ```
pub fn notice_days_for_years(years: u32, rules: &NoticeRules) -> u32 {
    years
        .saturating_mul(rules.days_per_year)
        .saturating_add(rules.base_days)
        .min(rules.max_days)
}

/// Calculates the statutory notice length for a tenure.
///
/// The length is computed regardless of termination category; whether it is
/// paid, owed or ignored is decided by the entitlement matrix.
pub fn calculate_notice_period(
    tenure: &Tenure,
    rules: &NoticeRules,
    step_number: u32,
) -> NoticePeriodResult {
    let uncapped = rules
        .base_days
        .saturating_add(tenure.years.saturating_mul(rules.days_per_year));
    let days = notice_days_for_years(tenure.years, rules);
    let capped = uncapped > days;

    let reasoning = if capped {
        format!(
            "{} + {} x {} years = {} days (capped at {})",
            rules.base_days, rules.days_per_year, tenure.years, uncapped, rules.max_days
        )
    } else {
        format!(
            "{} + {} x {} years = {} days",
            rules.base_days, rules.days_per_year, tenure.years, days
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "notice_period".to_string(),
        rule_name: "Notice Period Length".to_string(),
        clause_ref: rules.clause.clone(),
        input: serde_json::json!({
            "tenure_years": tenure.years,
            "tenure_months": tenure.months,
            "base_days": rules.base_days,
            "days_per_year": rules.days_per_year
        }),
        output: serde_json::json!({
            "notice_days": days,
            "cap_applied": capped
        }),
        reasoning,
    };

    NoticePeriodResult { days, audit_step }
}
