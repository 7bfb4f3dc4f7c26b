//! Attendance submission.

use tracing::info;

use super::{PayrollEngine, resolve_employee};
use crate::error::{EngineError, EngineResult};
use crate::models::{Attendance, AttendanceType, Principal};
use crate::store::{AuditRecorder, Repository};
use crate::validation::{AttendanceAction, resolve_attendance};

impl PayrollEngine {
    /// Checks the principal's employee in or out at the current time.
    ///
    /// Returns the created or completed attendance record.
    pub fn submit_attendance(
        &self,
        principal: &Principal,
        kind: AttendanceType,
    ) -> EngineResult<Attendance> {
        let now = self.clock.now();
        let attendance = self.store.transaction(|db| {
            let employee = resolve_employee(db, principal)?;
            let existing = db.attendances.find_by(|a| a.employee_id == employee.id);
            let audit = AuditRecorder::new(principal, now);

            match resolve_attendance(employee.id, kind, now, &existing)? {
                AttendanceAction::CheckIn(record) => {
                    let created = db.attendances.create(record)?;
                    audit.record_create(&mut db.audit_logs, &created)?;
                    Ok::<_, EngineError>(created)
                }
                AttendanceAction::CheckOut {
                    attendance_id,
                    clock_out_time,
                } => {
                    let before = db
                        .attendances
                        .find_by_id(attendance_id)
                        .ok_or_else(|| EngineError::not_found("attendance"))?;
                    let after = db
                        .attendances
                        .update(attendance_id, |a| a.clock_out_time = Some(clock_out_time))?;
                    audit.record_update(&mut db.audit_logs, &before, &after)?;
                    Ok(after)
                }
            }
        })?;

        info!(
            employee_id = attendance.employee_id,
            attendance_id = attendance.id,
            kind = ?kind,
            "attendance submitted"
        );
        Ok(attendance)
    }
}
