//! Overtime submission.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{PayrollEngine, resolve_employee};
use crate::error::{EngineError, EngineResult};
use crate::models::{Overtime, Principal};
use crate::store::{AuditRecorder, Repository};
use crate::validation::{validate_overtime, validate_overtime_window};

/// A request to record overtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSubmission {
    /// When the overtime started.
    pub start_at: NaiveDateTime,
    /// When the overtime ended.
    pub end_at: NaiveDateTime,
    /// What the overtime was for.
    #[serde(default)]
    pub description: String,
}

impl PayrollEngine {
    /// Records overtime for the principal's employee after checking it
    /// against the employee's existing overtime.
    ///
    /// A principal without an employee record is not-found before the
    /// submission is validated.
    pub fn submit_overtime(
        &self,
        principal: &Principal,
        submission: OvertimeSubmission,
    ) -> EngineResult<Overtime> {
        let OvertimeSubmission {
            start_at,
            end_at,
            description,
        } = submission;

        let now = self.clock.now();
        let overtime = self.store.transaction(|db| {
            let employee = resolve_employee(db, principal)?;
            validate_overtime_window(start_at, end_at, &self.policy)?;
            let existing = db.overtimes.find_by(|o| o.employee_id == employee.id);
            validate_overtime(&existing, start_at, end_at, &self.policy)?;

            let overtime = db
                .overtimes
                .create(Overtime::new(employee.id, start_at, end_at, description))?;
            AuditRecorder::new(principal, now).record_create(&mut db.audit_logs, &overtime)?;
            Ok::<_, EngineError>(overtime)
        })?;

        info!(
            employee_id = overtime.employee_id,
            overtime_id = overtime.id,
            start_at = %overtime.start_at,
            minutes = overtime.duration().num_minutes(),
            "overtime submitted"
        );
        Ok(overtime)
    }
}
