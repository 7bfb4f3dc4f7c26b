//! Calculation logic for the payslip engine.
//!
//! This module contains the pure calculators a payroll run applies per
//! employee: day detection and working-day counting, salary proration,
//! hourly rate and overtime pay, and reimbursement aggregation. Each
//! calculator returns a result struct carrying the [`AuditStep`] that
//! describes the rule it applied.
//!
//! [`AuditStep`]: crate::models::AuditStep

mod day_detection;
mod overtime_pay;
mod proration;
mod reimbursement_total;

pub use day_detection::{
    DayType, WorkingDaysResult, calculate_working_days, count_working_days, get_day_type,
    is_working_day,
};
pub use overtime_pay::{OvertimePayResult, calculate_overtime_pay, hourly_rate};
pub use proration::{ProrationResult, calculate_prorated_salary, prorate};
pub use reimbursement_total::{ReimbursementTotalResult, calculate_reimbursement_total};
