//! Entity bindings for the domain models.

use chrono::NaiveDate;

use crate::models::{
    Account, Attendance, AttendancePeriod, AuditLogEntry, Employee, Overtime, Payroll, Payslip,
    Reimbursement,
};

use super::{Entity, Table};

macro_rules! entity {
    ($ty:ty, $table:literal) => {
        entity!($ty, $table, |_r| None);
    };
    ($ty:ty, $table:literal, |$r:ident| $key:expr) => {
        impl Entity for $ty {
            const TABLE: &'static str = $table;

            fn id(&self) -> i64 {
                self.id
            }

            fn assign_id(&mut self, id: i64) {
                self.id = id;
            }

            fn unique_key(&self) -> Option<String> {
                let $r = self;
                $key
            }
        }
    };
}

entity!(Account, "accounts", |r| Some(r.username.to_lowercase()));
entity!(Employee, "employees", |r| Some(r.user_id.to_string()));
entity!(AttendancePeriod, "attendance_periods");
entity!(Attendance, "attendances", |r| Some(format!(
    "{}:{}",
    r.employee_id,
    r.clock_in_date()
)));
entity!(Overtime, "overtimes");
entity!(Reimbursement, "reimbursements");
entity!(Payroll, "payrolls", |r| Some(r.attendance_period_id.to_string()));
entity!(Payslip, "payslips", |r| Some(format!(
    "{}:{}",
    r.employee_id, r.payroll_id
)));
entity!(AuditLogEntry, "audit_logs");

impl Table<Attendance> {
    /// Counts an employee's attendance records whose check-in date lies in
    /// `[start, end]`.
    pub fn count_in_range(&self, employee_id: i64, start: NaiveDate, end: NaiveDate) -> u32 {
        let count = self
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .filter(|a| (start..=end).contains(&a.clock_in_date()))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}
