//! Payroll and payslip models.
//!
//! A [`Payroll`] is one run over a single attendance period; a [`Payslip`] is
//! one employee's computed compensation for that run.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One aggregate payroll run over an attendance period.
///
/// At most one payroll exists per attendance period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payroll {
    /// Store-assigned identifier (0 until persisted).
    pub id: i64,
    /// The period this payroll covers. Unique across payrolls.
    pub attendance_period_id: i64,
    /// Number of employees paid in this run.
    pub employees_count: i64,
    /// Sum of all payslip reimbursement totals.
    pub total_reimbursement: i64,
    /// Sum of all payslip overtime pay.
    pub total_overtime: i64,
    /// Sum of all payslip take-home amounts.
    pub total_payroll: i64,
}

impl Payroll {
    /// Creates an unsaved payroll shell with zeroed totals.
    pub fn shell(attendance_period_id: i64, employees_count: i64) -> Self {
        Self {
            id: 0,
            attendance_period_id,
            employees_count,
            total_reimbursement: 0,
            total_overtime: 0,
            total_payroll: 0,
        }
    }
}

/// Running period totals accumulated while payslips are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Sum of reimbursement totals.
    pub reimbursement: i64,
    /// Sum of overtime pay.
    pub overtime: i64,
    /// Sum of take-home pay.
    pub payroll: i64,
}

impl PayrollTotals {
    /// Adds one payslip's contribution. Totals are left untouched when any
    /// sum would leave the `i64` range.
    pub fn add(&mut self, payslip: &Payslip) -> EngineResult<()> {
        let sum = |total: i64, amount: i64| {
            total
                .checked_add(amount)
                .ok_or_else(EngineError::amount_out_of_range)
        };
        let reimbursement = sum(self.reimbursement, payslip.reimbursement_total)?;
        let overtime = sum(self.overtime, payslip.overtime_total_pay)?;
        let payroll = sum(self.payroll, payslip.total_take_home)?;
        *self = Self {
            reimbursement,
            overtime,
            payroll,
        };
        Ok(())
    }
}

/// One employee's compensation breakdown for a payroll.
///
/// Derived by the payroll run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Store-assigned identifier (0 until persisted).
    pub id: i64,
    /// The paid employee.
    pub employee_id: i64,
    /// The payroll this payslip belongs to.
    pub payroll_id: i64,
    /// The employee's base salary at run time.
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
    /// Reimbursements falling inside the period.
    pub reimbursement_total: i64,
    /// `prorated_salary + overtime_total_pay + reimbursement_total`.
    pub total_take_home: i64,
}
