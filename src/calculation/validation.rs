//! Scenario validation.
//!
//! Every check runs before any calculation stage, so an invalid scenario
//! never yields a partial settlement.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{NoticeDisposition, TerminationCategory, TerminationScenario};

/// Largest monetary input accepted. Every derived amount stays far inside
/// the `Decimal` range below this bound.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

fn money_in_range(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::InvalidAmount {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    if value > MAX_AMOUNT {
        return Err(EngineError::InvalidAmount {
            field: field.to_string(),
            message: format!("must not exceed {}, got {}", MAX_AMOUNT, value),
        });
    }
    Ok(())
}

fn unsupported(scenario: &TerminationScenario, message: impl Into<String>) -> EngineError {
    EngineError::UnsupportedCategoryNoticeCombination {
        category: scenario.category.to_string(),
        disposition: scenario.notice.to_string(),
        message: message.into(),
    }
}

/// Validates a scenario before calculation.
///
/// # Errors
///
/// * `InvalidDateRange` - the end date (or the notice override end) precedes
///   its start
/// * `InvalidAmount` - negative salary, overdue vacation count, additional
///   hours amount or FGTS balance, or a monetary input above [`MAX_AMOUNT`]
/// * `UnsupportedCategoryNoticeCombination` - indemnified notice on a
///   dismissal for cause, or a notice override that does not describe a
///   worked notice ending on the contract end date
pub fn validate_scenario(scenario: &TerminationScenario) -> EngineResult<()> {
    if scenario.end_date < scenario.start_date {
        return Err(EngineError::InvalidDateRange {
            start: scenario.start_date,
            end: scenario.end_date,
        });
    }

    money_in_range("monthly_salary", scenario.monthly_salary)?;
    money_in_range("additional_hours_amount", scenario.additional_hours_amount)?;
    money_in_range("fgts_balance", scenario.fgts_balance)?;
    if scenario.overdue_vacation_periods < 0 {
        return Err(EngineError::InvalidAmount {
            field: "overdue_vacation_periods".to_string(),
            message: format!(
                "must not be negative, got {}",
                scenario.overdue_vacation_periods
            ),
        });
    }

    if scenario.category == TerminationCategory::ForCause
        && scenario.notice == NoticeDisposition::Indemnified
    {
        return Err(unsupported(
            scenario,
            "no notice is due on dismissal for cause",
        ));
    }

    if let Some(notice_override) = scenario.notice_override {
        if notice_override.end < notice_override.start {
            return Err(EngineError::InvalidDateRange {
                start: notice_override.start,
                end: notice_override.end,
            });
        }
        if scenario.notice != NoticeDisposition::Worked {
            return Err(unsupported(
                scenario,
                "notice dates can only be given for a worked notice",
            ));
        }
        if notice_override.end != scenario.end_date {
            return Err(unsupported(
                scenario,
                format!(
                    "worked notice ends {} but the contract ends {}",
                    notice_override.end, scenario.end_date
                ),
            ));
        }
        if notice_override.start < scenario.start_date {
            return Err(unsupported(
                scenario,
                format!(
                    "worked notice starts {} before employment started {}",
                    notice_override.start, scenario.start_date
                ),
            ));
        }
    }

    Ok(())
}
