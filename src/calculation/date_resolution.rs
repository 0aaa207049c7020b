//! Tenure and projected end date resolution.
//!
//! When a paid notice projects the contract, the legal end date moves
//! forward by the notice length, and the notice length itself depends on
//! tenure. The dependency is resolved in two passes: a tentative notice from
//! the raw tenure, then a recomputation from the tenure up to the projected
//! date, re-projecting once if the length changed.

use chrono::{Days, NaiveDate};

use crate::config::NoticeRules;
use crate::error::EngineResult;
use crate::models::{AuditStep, TerminationScenario, Tenure};

use super::notice_period::calculate_notice_period;
use super::tenure::{TENURE_CLAUSE, calculate_tenure};

/// Clause reference for projecting the contract by the notice period.
pub const PROJECTION_CLAUSE: &str = "Art. 487 §1; TST OJ SDI-1 82";

/// The resolved dates, tenure and notice length.
#[derive(Debug, Clone)]
pub struct DateResolution {
    /// Service time from hire to the projected end date.
    pub tenure: Tenure,
    /// Resolved notice length in days.
    pub notice_days: u32,
    /// Statutory notice length for the tenure, regardless of any served
    /// notice dates.
    pub statutory_notice_days: u32,
    /// Whether the end date was projected by the notice.
    pub notice_projected: bool,
    /// The legal end date used for accruals.
    pub projected_end_date: NaiveDate,
    /// The audit steps recording the resolution.
    pub audit_steps: Vec<AuditStep>,
}

fn project(end_date: NaiveDate, notice_days: u32) -> NaiveDate {
    end_date
        .checked_add_days(Days::new(u64::from(notice_days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Resolves tenure, notice length and the projected end date.
///
/// * `projects_notice` - whether the entitlement pays the notice, which
///   extends the contract for accrual purposes
///
/// When the scenario carries a worked-notice override, the resolved notice
/// length is the inclusive length of the override and nothing is projected.
/// The statutory length is still reported, so a short served notice can be
/// compared against what the tenure required.
///
/// # Errors
///
/// Returns `InvalidDateRange` if the end date is before the start date.
pub fn resolve_dates(
    scenario: &TerminationScenario,
    rules: &NoticeRules,
    projects_notice: bool,
    step_number: u32,
) -> EngineResult<DateResolution> {
    let mut audit_steps = Vec::new();
    let mut step = step_number;

    let raw_tenure = calculate_tenure(scenario.start_date, scenario.end_date)?;
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "tenure".to_string(),
        rule_name: "Tenure".to_string(),
        clause_ref: TENURE_CLAUSE.to_string(),
        input: serde_json::json!({
            "start_date": scenario.start_date.to_string(),
            "end_date": scenario.end_date.to_string()
        }),
        output: serde_json::json!({
            "years": raw_tenure.years,
            "months": raw_tenure.months,
            "days": raw_tenure.days
        }),
        reasoning: format!(
            "Service from {} to {}: {}",
            scenario.start_date, scenario.end_date, raw_tenure
        ),
    });
    step += 1;

    let tentative = calculate_notice_period(&raw_tenure, rules, step);
    audit_steps.push(tentative.audit_step);
    step += 1;

    if let Some(notice_override) = scenario.notice_override {
        let notice_days = notice_override.days().max(0) as u32;
        audit_steps.push(AuditStep {
            step_number: step,
            rule_id: "notice_override".to_string(),
            rule_name: "Served Notice".to_string(),
            clause_ref: "Art. 488".to_string(),
            input: serde_json::json!({
                "notice_start": notice_override.start.to_string(),
                "notice_end": notice_override.end.to_string(),
                "statutory_days": tentative.days
            }),
            output: serde_json::json!({
                "notice_days": notice_days,
                "projected": false
            }),
            reasoning: format!(
                "Notice served from {} to {} ({} days); no projection",
                notice_override.start, notice_override.end, notice_days
            ),
        });

        return Ok(DateResolution {
            tenure: raw_tenure,
            notice_days,
            statutory_notice_days: tentative.days,
            notice_projected: false,
            projected_end_date: scenario.end_date,
            audit_steps,
        });
    }

    if !projects_notice {
        return Ok(DateResolution {
            tenure: raw_tenure,
            notice_days: tentative.days,
            statutory_notice_days: tentative.days,
            notice_projected: false,
            projected_end_date: scenario.end_date,
            audit_steps,
        });
    }

    // Second pass: the projected service time may complete another year.
    let first_projection = project(scenario.end_date, tentative.days);
    let projected_tenure = calculate_tenure(scenario.start_date, first_projection)?;
    let recomputed = calculate_notice_period(&projected_tenure, rules, step);

    let (notice_days, projected_end_date) = if recomputed.days != tentative.days {
        audit_steps.push(recomputed.audit_step);
        step += 1;
        (
            recomputed.days,
            project(scenario.end_date, recomputed.days),
        )
    } else {
        (tentative.days, first_projection)
    };

    let tenure = calculate_tenure(scenario.start_date, projected_end_date)?;
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "end_date_projection".to_string(),
        rule_name: "Notice Projection".to_string(),
        clause_ref: PROJECTION_CLAUSE.to_string(),
        input: serde_json::json!({
            "end_date": scenario.end_date.to_string(),
            "tentative_notice_days": tentative.days
        }),
        output: serde_json::json!({
            "notice_days": notice_days,
            "projected_end_date": projected_end_date.to_string(),
            "tenure_years": tenure.years,
            "tenure_months": tenure.months,
            "tenure_days": tenure.days
        }),
        reasoning: format!(
            "{} + {} days notice = {}",
            scenario.end_date, notice_days, projected_end_date
        ),
    });

    Ok(DateResolution {
        tenure,
        notice_days,
        statutory_notice_days: notice_days,
        notice_projected: true,
        projected_end_date,
        audit_steps,
    })
}
