//! Calculation logic for the Termination Settlement Engine.
//!
//! This module contains the calculation stages for a CLT termination
//! settlement: scenario validation, the entitlement matrix, tenure and
//! notice-period resolution with end-date projection, the wage basis,
//! 13th-salary and vacation twelfths, salary balance days, the line-item
//! assembler and the totals aggregator. [`compute`] runs them in order.

mod aggregator;
mod date_resolution;
mod engine;
mod entitlement;
mod line_items;
mod notice_period;
mod salary_balance;
mod tenure;
mod thirteenth_salary;
mod validation;
mod vacation;
mod wage_basis;

pub use aggregator::{AggregationResult, SettlementTotals, aggregate_line_items, sum_line_items};
pub use date_resolution::{DateResolution, PROJECTION_CLAUSE, resolve_dates};
pub use engine::{compute, compute_with_config};
pub use entitlement::{
    Entitlement, EntitlementResult, NoticeEntitlement, NoticeOutcome, determine_entitlement,
    entitlement_for,
};
pub use line_items::{LineItemsResult, assemble_line_items, round_money};
pub use notice_period::{NoticePeriodResult, calculate_notice_period, notice_days_for_years};
pub use salary_balance::{
    SALARY_BALANCE_CLAUSE, SalaryBalanceResult, calculate_salary_balance_days,
    count_salary_balance_days,
};
pub use tenure::{TENURE_CLAUSE, calculate_tenure, completed_months};
pub use thirteenth_salary::{
    THIRTEENTH_CLAUSE, ThirteenthMonthsResult, calculate_thirteenth_months,
    count_thirteenth_months, count_thirteenth_months_spanning,
};
pub use validation::{MAX_AMOUNT, validate_scenario};
pub use vacation::{
    OVERDUE_VACATION_CLAUSE, VACATION_BONUS_CLAUSE, VACATION_CLAUSE, VacationMonthsResult,
    calculate_vacation_months, count_vacation_months, last_anniversary,
};
pub use wage_basis::{WageBasisResult, calculate_wage_basis};
