//! Core data models for the payslip engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod attendance_period;
mod audit;
mod employee;
mod overtime;
mod payroll;
mod principal;
mod reimbursement;
mod report;

pub use attendance::{Attendance, AttendanceType};
pub use attendance_period::AttendancePeriod;
pub use audit::{AuditAction, AuditLogEntry, AuditStep, AuditTrace, AuditWarning};
pub use employee::{Account, Employee, Role};
pub use overtime::Overtime;
pub use payroll::{Payroll, PayrollTotals, Payslip};
pub use principal::Principal;
pub use reimbursement::Reimbursement;
pub use report::{
    PayrollRunResult, PayrollSummary, PayslipLine, PayslipView, PeriodDates, ReimbursementLine,
};
