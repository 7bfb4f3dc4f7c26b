//! Payroll runs.
//!
//! A run moves through [`RunStage`]s inside a single store transaction:
//! validate the period, refuse a second payroll for it, load employees, create
//! the payroll shell, compute one payslip per employee, then write the totals.
//! Any failure discards every write of the run.

use std::fmt;
use std::time::Instant;

use chrono::{NaiveDateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{PayrollEngine, require_admin};
use crate::calculation::{
    calculate_overtime_pay, calculate_prorated_salary, calculate_reimbursement_total,
    calculate_working_days,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendancePeriod, AuditTrace, AuditWarning, Employee, Payroll, PayrollRunResult,
    PayrollTotals, Payslip, Principal,
};
use crate::store::{AuditRecorder, Database, Repository};

/// Progress of a payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    /// Nothing has happened yet.
    NotStarted,
    /// Loading the period and checking for an existing payroll.
    Validating,
    /// The employee set is loaded and non-empty.
    EmployeesLoaded,
    /// The zero-total payroll row exists.
    PayrollShellCreated,
    /// Computing the payslip of the employee at this index.
    ProcessingEmployees(usize),
    /// Period totals are written.
    TotalsUpdated,
    /// The run committed.
    Done,
    /// The run aborted and was rolled back.
    Failed,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStage::NotStarted => write!(f, "not_started"),
            RunStage::Validating => write!(f, "validating"),
            RunStage::EmployeesLoaded => write!(f, "employees_loaded"),
            RunStage::PayrollShellCreated => write!(f, "payroll_shell_created"),
            RunStage::ProcessingEmployees(index) => write!(f, "processing_employees({})", index),
            RunStage::TotalsUpdated => write!(f, "totals_updated"),
            RunStage::Done => write!(f, "done"),
            RunStage::Failed => write!(f, "failed"),
        }
    }
}

fn advance(stage: &mut RunStage, next: RunStage) {
    debug!(from = %stage, to = %next, "payroll run stage");
    *stage = next;
}

impl PayrollEngine {
    /// Runs payroll for an attendance period.
    ///
    /// Fails with not-found when the period is absent, with a conflict when a
    /// payroll already exists for it, and with a validation error when there
    /// are no employees. On success the payroll, every payslip and the totals
    /// are committed together.
    pub fn run_payroll(
        &self,
        principal: &Principal,
        attendance_period_id: i64,
    ) -> EngineResult<PayrollRunResult> {
        let started = Instant::now();
        let now = self.clock.now();
        let mut stage = RunStage::NotStarted;

        let outcome = self.store.transaction(|db| {
            require_admin(db, principal)?;
            self.execute_run(db, principal, attendance_period_id, now, &mut stage)
        });

        match outcome {
            Ok(mut result) => {
                result.audit_trace.duration_us =
                    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
                info!(
                    run_id = %result.run_id,
                    payroll_id = result.payroll.id,
                    attendance_period_id,
                    employees = result.payroll.employees_count,
                    total_payroll = result.payroll.total_payroll,
                    duration_us = result.audit_trace.duration_us,
                    "payroll run completed"
                );
                Ok(result)
            }
            Err(error) => {
                let failed_at = std::mem::replace(&mut stage, RunStage::Failed);
                warn!(
                    attendance_period_id,
                    failed_at = %failed_at,
                    stage = %stage,
                    error = %error,
                    "payroll run aborted"
                );
                Err(error)
            }
        }
    }

    fn execute_run(
        &self,
        db: &mut Database,
        principal: &Principal,
        attendance_period_id: i64,
        now: NaiveDateTime,
        stage: &mut RunStage,
    ) -> EngineResult<PayrollRunResult> {
        advance(stage, RunStage::Validating);
        let period = db
            .attendance_periods
            .find_by_id(attendance_period_id)
            .ok_or_else(|| EngineError::not_found("attendance period"))?;
        if db
            .payrolls
            .find_one_by(|p| p.attendance_period_id == period.id)
            .is_some()
        {
            return Err(EngineError::conflict(
                "payroll already exists for this attendance period",
            ));
        }

        let employees = db.employees.find_by(|_| true);
        if employees.is_empty() {
            return Err(EngineError::validation("no employees found"));
        }
        advance(stage, RunStage::EmployeesLoaded);

        let mut trace = AuditTrace::default();
        let working_days = calculate_working_days(&period, next_step(&trace));
        let total_working_days = working_days.total_working_days;
        trace.steps.push(working_days.audit_step);
        if total_working_days == 0 {
            warn!(period_id = period.id, "attendance period has no working days");
            trace.warnings.push(AuditWarning {
                code: "ZERO_WORKING_DAYS".to_string(),
                message: format!(
                    "Period {} to {} contains no weekdays; every prorated salary is 0",
                    period.start_date, period.end_date
                ),
                severity: "high".to_string(),
            });
        }

        let audit = AuditRecorder::new(principal, now);
        let employees_count = i64::try_from(employees.len()).unwrap_or(i64::MAX);
        let shell = db
            .payrolls
            .create(Payroll::shell(period.id, employees_count))?;
        audit.record_create(&mut db.audit_logs, &shell)?;
        advance(stage, RunStage::PayrollShellCreated);

        let mut totals = PayrollTotals::default();
        let mut payslips = Vec::with_capacity(employees.len());
        for (index, employee) in employees.iter().enumerate() {
            advance(stage, RunStage::ProcessingEmployees(index));
            let payslip =
                self.compute_payslip(db, employee, &shell, &period, total_working_days, &mut trace)?;
            let payslip = db.payslips.create(payslip)?;
            audit.record_create(&mut db.audit_logs, &payslip)?;
            totals.add(&payslip)?;
            payslips.push(payslip);
        }

        let payroll = db.payrolls.update(shell.id, |p| {
            p.total_reimbursement = totals.reimbursement;
            p.total_overtime = totals.overtime;
            p.total_payroll = totals.payroll;
        })?;
        audit.record_update(&mut db.audit_logs, &shell, &payroll)?;
        advance(stage, RunStage::TotalsUpdated);

        advance(stage, RunStage::Done);
        Ok(PayrollRunResult {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            payroll,
            payslips,
            audit_trace: trace,
        })
    }

    fn compute_payslip(
        &self,
        db: &Database,
        employee: &Employee,
        payroll: &Payroll,
        period: &AttendancePeriod,
        total_working_days: u32,
        trace: &mut AuditTrace,
    ) -> EngineResult<Payslip> {
        let attendance_count =
            db.attendances
                .count_in_range(employee.id, period.start_date, period.end_date);

        let proration = calculate_prorated_salary(
            employee.base_salary,
            attendance_count,
            total_working_days,
            next_step(trace),
        );
        trace.steps.push(proration.audit_step);

        let overtimes = db.overtimes.find_by(|o| o.employee_id == employee.id);
        let overtime = calculate_overtime_pay(
            &overtimes,
            employee.base_salary,
            period,
            &self.policy,
            next_step(trace),
        )?;
        trace.steps.push(overtime.audit_step);

        let reimbursements = db.reimbursements.find_by(|r| r.employee_id == employee.id);
        let reimbursement =
            calculate_reimbursement_total(&reimbursements, period, next_step(trace))?;
        trace.steps.push(reimbursement.audit_step);

        let total_take_home = proration
            .prorated_salary
            .checked_add(overtime.total_pay)
            .and_then(|sum| sum.checked_add(reimbursement.total))
            .ok_or_else(EngineError::amount_out_of_range)?;
        debug!(
            employee_id = employee.id,
            attendance_count,
            total_take_home,
            "payslip computed"
        );

        Ok(Payslip {
            id: 0,
            employee_id: employee.id,
            payroll_id: payroll.id,
            base_salary: employee.base_salary,
            attendance_count,
            total_working_days,
            prorated_salary: proration.prorated_salary,
            overtime_total_hours: overtime.total_hours,
            overtime_total_pay: overtime.total_pay,
            reimbursement_total: reimbursement.total,
            total_take_home,
        })
    }
}

fn next_step(trace: &AuditTrace) -> u32 {
    u32::try_from(trace.steps.len()).map_or(u32::MAX, |n| n.saturating_add(1))
}
