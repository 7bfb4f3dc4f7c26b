//! Read-only payroll views.

use tracing::warn;

use super::{PayrollEngine, require_admin, resolve_employee};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendancePeriod, Payroll, PayrollSummary, PayslipLine, PayslipView, Principal,
    ReimbursementLine,
};
use crate::store::{Database, Repository};

impl PayrollEngine {
    /// Assembles the admin view of a payroll: period totals plus one line per
    /// payslip.
    ///
    /// Payslips whose employee or account record is missing are left out.
    pub fn get_payroll_summary(
        &self,
        principal: &Principal,
        payroll_id: i64,
    ) -> EngineResult<PayrollSummary> {
        self.store.read(|db| {
            require_admin(db, principal)?;
            build_summary(db, payroll_id)
        })?
    }

    /// Assembles the principal's own payslip for a payroll, itemizing the
    /// reimbursements dated within the period.
    pub fn get_payslip(&self, principal: &Principal, payroll_id: i64) -> EngineResult<PayslipView> {
        self.store.read(|db| {
            let employee = resolve_employee(db, principal)?;
            let payroll = find_payroll(db, payroll_id)?;
            let period = period_of(db, &payroll)?;

            let payslip = db
                .payslips
                .find_one_by(|p| p.employee_id == employee.id && p.payroll_id == payroll.id)
                .ok_or_else(|| EngineError::not_found("payslip"))?;

            let reimbursements = db
                .reimbursements
                .find_by(|r| r.employee_id == employee.id && period.contains_date(r.date))
                .iter()
                .map(ReimbursementLine::from)
                .collect();

            Ok::<_, EngineError>(PayslipView::new(&payslip, &period, reimbursements))
        })?
    }
}

fn find_payroll(db: &Database, payroll_id: i64) -> EngineResult<Payroll> {
    db.payrolls
        .find_by_id(payroll_id)
        .ok_or_else(|| EngineError::not_found("payroll"))
}

fn period_of(db: &Database, payroll: &Payroll) -> EngineResult<AttendancePeriod> {
    db.attendance_periods
        .find_by_id(payroll.attendance_period_id)
        .ok_or_else(|| {
            tracing::error!(
                payroll_id = payroll.id,
                attendance_period_id = payroll.attendance_period_id,
                "payroll references a missing attendance period"
            );
            EngineError::internal("failed to load attendance period")
        })
}

fn build_summary(db: &Database, payroll_id: i64) -> EngineResult<PayrollSummary> {
    let payroll = find_payroll(db, payroll_id)?;
    let period = period_of(db, &payroll)?;

    let mut lines = Vec::new();
    for payslip in db.payslips.find_by(|p| p.payroll_id == payroll.id) {
        let Some(employee) = db.employees.find_by_id(payslip.employee_id) else {
            warn!(
                payslip_id = payslip.id,
                employee_id = payslip.employee_id,
                "employee missing, line skipped"
            );
            continue;
        };
        let Some(account) = db.accounts.find_by_id(employee.user_id) else {
            warn!(
                payslip_id = payslip.id,
                user_id = employee.user_id,
                "account missing, line skipped"
            );
            continue;
        };

        lines.push(PayslipLine {
            employee_id: employee.id,
            username: account.username,
            base_salary: payslip.base_salary,
            attendance_count: payslip.attendance_count,
            overtime_hours: payslip.overtime_total_hours,
            prorated_salary: payslip.prorated_salary,
            overtime_pay: payslip.overtime_total_pay,
            reimbursement_total: payslip.reimbursement_total,
            total_take_home: payslip.total_take_home,
        });
    }

    Ok(PayrollSummary {
        payroll_id: payroll.id,
        attendance_period: (&period).into(),
        employees_count: payroll.employees_count,
        total_payroll: payroll.total_payroll,
        total_reimbursement: payroll.total_reimbursement,
        total_overtime: payroll.total_overtime,
        payslips: lines,
    })
}
