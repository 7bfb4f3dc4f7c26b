//! Attendance period administration.

use chrono::NaiveDate;
use tracing::info;

use super::{PayrollEngine, require_admin};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendancePeriod, Principal};
use crate::store::{AuditRecorder, Repository};
use crate::validation::{ensure_no_overlap, validate_period_dates};

impl PayrollEngine {
    /// Creates a period covering `[start_date, end_date]`.
    ///
    /// Fails with a validation error when `start_date > end_date` and with a
    /// conflict when the range overlaps an existing period.
    pub fn create_attendance_period(
        &self,
        principal: &Principal,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> EngineResult<AttendancePeriod> {
        let now = self.clock.now();
        let period = self.store.transaction(|db| {
            require_admin(db, principal)?;
            validate_period_dates(start_date, end_date)?;

            let existing = db.attendance_periods.find_by(|_| true);
            ensure_no_overlap(&existing, start_date, end_date, None)?;

            let period = db
                .attendance_periods
                .create(AttendancePeriod::new(start_date, end_date))?;
            AuditRecorder::new(principal, now).record_create(&mut db.audit_logs, &period)?;
            Ok::<_, EngineError>(period)
        })?;

        info!(
            period_id = period.id,
            start_date = %period.start_date,
            end_date = %period.end_date,
            "attendance period created"
        );
        Ok(period)
    }

    /// Moves an existing period to `[start_date, end_date]`.
    pub fn update_attendance_period(
        &self,
        principal: &Principal,
        period_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> EngineResult<AttendancePeriod> {
        let now = self.clock.now();
        let period = self.store.transaction(|db| {
            require_admin(db, principal)?;
            validate_period_dates(start_date, end_date)?;

            let before = db
                .attendance_periods
                .find_by_id(period_id)
                .ok_or_else(|| EngineError::not_found("attendance period"))?;

            let existing = db.attendance_periods.find_by(|_| true);
            ensure_no_overlap(&existing, start_date, end_date, Some(period_id))?;

            let after = db.attendance_periods.update(period_id, |p| {
                p.start_date = start_date;
                p.end_date = end_date;
            })?;
            AuditRecorder::new(principal, now).record_update(&mut db.audit_logs, &before, &after)?;
            Ok::<_, EngineError>(after)
        })?;

        info!(
            period_id = period.id,
            start_date = %period.start_date,
            end_date = %period.end_date,
            "attendance period updated"
        );
        Ok(period)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::fixtures::*;
    use crate::error::ErrorKind;
    use crate::models::AuditAction;
    use crate::store::MemoryStore;

    #[test]
    fn test_create_period() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-02-03 09:00");
        let admin = admin(&engine);

        let period = engine
            .create_attendance_period(&admin, date("2025-01-01"), date("2025-01-31"))
            .unwrap();
        assert_eq!(period.start_date, date("2025-01-01"));

        let entry = engine.audit_log().unwrap().pop().unwrap();
        assert_eq!(entry.table, "attendance_periods");
        assert_eq!(entry.record_id, period.id);
        assert_eq!(entry.user_id, Some(admin.user_id));
    }

    #[test]
    fn test_create_rejects_inverted_range() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-02-03 09:00");
        let admin = admin(&engine);

        let err = engine
            .create_attendance_period(&admin, date("2025-01-31"), date("2025-01-01"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_create_rejects_overlap() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-02-03 09:00");
        let admin = admin(&engine);
        engine
            .create_attendance_period(&admin, date("2025-01-01"), date("2025-01-31"))
            .unwrap();

        let err = engine
            .create_attendance_period(&admin, date("2025-01-31"), date("2025-02-27"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(
            engine
                .create_attendance_period(&admin, date("2025-02-01"), date("2025-02-28"))
                .is_ok()
        );
    }

    #[test]
    fn test_employee_cannot_create_period() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-02-03 09:00");
        let employee = employee(&engine, "john_doe", 5_000_000);

        let err = engine
            .create_attendance_period(&employee, date("2025-01-01"), date("2025-01-31"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
    }

    #[test]
    fn test_update_period() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-02-03 09:00");
        let admin = admin(&engine);
        let period = engine
            .create_attendance_period(&admin, date("2025-01-01"), date("2025-01-31"))
            .unwrap();

        // Shrinking into its own old range is not an overlap.
        let updated = engine
            .update_attendance_period(&admin, period.id, date("2025-01-01"), date("2025-01-30"))
            .unwrap();
        assert_eq!(updated.end_date, date("2025-01-30"));

        let entry = engine.audit_log().unwrap().pop().unwrap();
        assert_eq!(entry.action, AuditAction::Update);
        assert_eq!(
            entry.data_after,
            Some(serde_json::json!({"end_date": "2025-01-30"}))
        );
    }

    #[test]
    fn test_update_missing_period_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-02-03 09:00");
        let admin = admin(&engine);

        let err = engine
            .update_attendance_period(&admin, 99, date("2025-01-01"), date("2025-01-31"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_update_into_other_period_is_conflict() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-02-03 09:00");
        let admin = admin(&engine);
        let january = engine
            .create_attendance_period(&admin, date("2025-01-01"), date("2025-01-31"))
            .unwrap();
        engine
            .create_attendance_period(&admin, date("2025-02-01"), date("2025-02-28"))
            .unwrap();

        let err = engine
            .update_attendance_period(&admin, january.id, date("2025-01-01"), date("2025-02-01"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}
