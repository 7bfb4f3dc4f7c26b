//! Payslip engine
//!
//! This crate records employee attendance, overtime and reimbursement claims
//! against admin-defined attendance periods and turns them into prorated
//! payslips. A payroll run is all-or-nothing: the payroll, every payslip and
//! the audit entries for them commit together.
//!
//! The building blocks are layered:
//!
//! - [`calculation`]: pure pay arithmetic (working days, proration, overtime
//!   pay, reimbursement totals), each step recorded for audit
//! - [`validation`]: business rules for periods, attendance, overtime and
//!   reimbursements
//! - [`store`]: in-memory tables with transactional writes and audit logging
//! - [`service`]: [`PayrollEngine`](service::PayrollEngine), the operations
//! - [`api`]: the axum HTTP surface

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;
