//! Read models returned by payroll operations.
//!
//! This module contains the [`PayrollRunResult`] produced by a payroll run and
//! the read-only views assembled for admins ([`PayrollSummary`]) and employees
//! ([`PayslipView`]).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AttendancePeriod, AuditTrace, Payroll, Payslip, Reimbursement};

/// The date range of a period as shown in views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodDates {
    /// First date (inclusive).
    pub start_date: NaiveDate,
    /// Last date (inclusive).
    pub end_date: NaiveDate,
}

impl From<&AttendancePeriod> for PeriodDates {
    fn from(period: &AttendancePeriod) -> Self {
        Self {
            start_date: period.start_date,
            end_date: period.end_date,
        }
    }
}

/// The complete result of a payroll run.
///
/// Captures the persisted payroll and payslips together with the audit
/// trace of every calculator application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunResult {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run completed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The persisted payroll with final totals.
    pub payroll: Payroll,
    /// One persisted payslip per employee.
    pub payslips: Vec<Payslip>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

/// One employee line in a payroll summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLine {
    /// The paid employee.
    pub employee_id: i64,
    /// The employee's login name.
    pub username: String,
    /// Base salary used for the run.
    pub base_salary: i64,
    /// Days present within the period.
    pub attendance_count: u32,
    /// Whole overtime hours paid.
    pub overtime_hours: i64,
    /// Base salary scaled by attendance.
    pub prorated_salary: i64,
    /// Overtime compensation.
    pub overtime_pay: i64,
    /// Reimbursements paid.
    pub reimbursement_total: i64,
    /// Total take-home pay.
    pub total_take_home: i64,
}

/// Admin view of a payroll: period aggregates plus one line per employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The payroll being summarised.
    pub payroll_id: i64,
    /// The period the payroll covers.
    pub attendance_period: PeriodDates,
    /// Number of employees paid.
    pub employees_count: i64,
    /// Sum of take-home pay.
    pub total_payroll: i64,
    /// Sum of reimbursements.
    pub total_reimbursement: i64,
    /// Sum of overtime pay.
    pub total_overtime: i64,
    /// Per-employee lines.
    pub payslips: Vec<PayslipLine>,
}

/// One itemised reimbursement on a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReimbursementLine {
    /// Expense date.
    pub date: NaiveDate,
    /// Amount paid.
    pub amount: i64,
    /// What the expense was for.
    pub description: String,
}

impl From<&Reimbursement> for ReimbursementLine {
    fn from(reimbursement: &Reimbursement) -> Self {
        Self {
            date: reimbursement.date,
            amount: reimbursement.amount,
            description: reimbursement.description.clone(),
        }
    }
}

/// Employee view of their own payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipView {
    /// The payroll this payslip belongs to.
    pub payroll_id: i64,
    /// The period the payroll covers.
    pub attendance_period: PeriodDates,
    /// The paid employee.
    pub employee_id: i64,
    /// Base salary used for the run.
    pub base_salary: i64,
    /// Days present within the period.
    pub attendance_count: u32,
    /// Monday–Friday dates within the period.
    pub total_working_days: u32,
    /// Base salary scaled by attendance.
    pub prorated_salary: i64,
    /// Whole overtime hours paid.
    pub overtime_total_hours: i64,
    /// Overtime compensation.
    pub overtime_total_pay: i64,
    /// Reimbursements inside the period, itemised.
    pub reimbursements: Vec<ReimbursementLine>,
    /// Sum of reimbursements paid.
    pub reimbursement_total: i64,
    /// Total take-home pay.
    pub total_take_home: i64,
}

impl PayslipView {
    /// Builds the view from a stored payslip and its period.
    pub fn new(
        payslip: &Payslip,
        period: &AttendancePeriod,
        reimbursements: Vec<ReimbursementLine>,
    ) -> Self {
        Self {
            payroll_id: payslip.payroll_id,
            attendance_period: period.into(),
            employee_id: payslip.employee_id,
            base_salary: payslip.base_salary,
            attendance_count: payslip.attendance_count,
            total_working_days: payslip.total_working_days,
            prorated_salary: payslip.prorated_salary,
            overtime_total_hours: payslip.overtime_total_hours,
            overtime_total_pay: payslip.overtime_total_pay,
            reimbursements,
            reimbursement_total: payslip.reimbursement_total,
            total_take_home: payslip.total_take_home,
        }
    }
}
