//! Attendance check-in / check-out resolution.

use chrono::NaiveDateTime;

use crate::calculation::is_working_day;
use crate::error::{EngineError, EngineResult};
use crate::models::{Attendance, AttendanceType};

/// The single mutation an attendance submission resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceAction {
    /// Insert a new record clocked in at `now`.
    CheckIn(Attendance),
    /// Fill the clock-out time of today's record.
    CheckOut {
        /// Today's attendance record.
        attendance_id: i64,
        /// The clock-out time to store.
        clock_out_time: NaiveDateTime,
    },
}

/// Decides what a submission of `kind` at `now` does, given the employee's
/// existing attendance records.
///
/// Only weekdays accept attendance. A second check-in on the same date, or a
/// second check-out, is a conflict; a check-out with no check-in today is a
/// validation error.
pub fn resolve_attendance(
    employee_id: i64,
    kind: AttendanceType,
    now: NaiveDateTime,
    existing: &[Attendance],
) -> EngineResult<AttendanceAction> {
    let today = now.date();
    if !is_working_day(today) {
        return Err(EngineError::validation(
            "attendance can only be submitted on weekdays",
        ));
    }

    let todays = existing
        .iter()
        .filter(|a| a.employee_id == employee_id)
        .find(|a| a.clock_in_date() == today);

    match kind {
        AttendanceType::CheckIn => match todays {
            Some(_) => Err(EngineError::conflict("already checked in today")),
            None => Ok(AttendanceAction::CheckIn(Attendance::check_in(
                employee_id,
                now,
            ))),
        },
        AttendanceType::CheckOut => match todays {
            None => Err(EngineError::validation(
                "cannot check out without checking in first",
            )),
            Some(record) if record.is_checked_out() => {
                Err(EngineError::conflict("already checked out today"))
            }
            Some(record) => Ok(AttendanceAction::CheckOut {
                attendance_id: record.id,
                clock_out_time: now,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn stored(id: i64, employee_id: i64, clock_in: &str, clock_out: Option<&str>) -> Attendance {
        Attendance {
            id,
            employee_id,
            clock_in_time: at(clock_in),
            clock_out_time: clock_out.map(at),
        }
    }

    #[test]
    fn test_first_check_in_creates_record() {
        // 2025-01-06 is a Monday
        let action = resolve_attendance(1, AttendanceType::CheckIn, at("2025-01-06 08:00"), &[])
            .unwrap();
        match action {
            AttendanceAction::CheckIn(record) => {
                assert_eq!(record.employee_id, 1);
                assert_eq!(record.clock_in_time, at("2025-01-06 08:00"));
                assert!(record.clock_out_time.is_none());
            }
            other => panic!("expected check-in, got {:?}", other),
        }
    }

    #[test]
    fn test_second_check_in_same_day_is_conflict() {
        let existing = vec![stored(5, 1, "2025-01-06 08:00", None)];
        let err = resolve_attendance(1, AttendanceType::CheckIn, at("2025-01-06 13:00"), &existing)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), "already checked in today");
    }

    #[test]
    fn test_check_in_after_yesterday_is_allowed() {
        let existing = vec![stored(5, 1, "2025-01-06 08:00", Some("2025-01-06 17:00"))];
        assert!(
            resolve_attendance(1, AttendanceType::CheckIn, at("2025-01-07 08:00"), &existing)
                .is_ok()
        );
    }

    #[test]
    fn test_other_employees_records_are_ignored() {
        let existing = vec![stored(5, 2, "2025-01-06 08:00", None)];
        assert!(
            resolve_attendance(1, AttendanceType::CheckIn, at("2025-01-06 08:00"), &existing)
                .is_ok()
        );
    }

    #[test]
    fn test_check_out_without_check_in_is_validation() {
        let err = resolve_attendance(1, AttendanceType::CheckOut, at("2025-01-06 17:00"), &[])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "cannot check out without checking in first");
    }

    #[test]
    fn test_check_out_fills_todays_record() {
        let existing = vec![
            stored(4, 1, "2025-01-03 08:00", None),
            stored(5, 1, "2025-01-06 08:00", None),
        ];
        let action =
            resolve_attendance(1, AttendanceType::CheckOut, at("2025-01-06 17:05"), &existing)
                .unwrap();
        assert_eq!(
            action,
            AttendanceAction::CheckOut {
                attendance_id: 5,
                clock_out_time: at("2025-01-06 17:05"),
            }
        );
    }

    #[test]
    fn test_second_check_out_is_conflict() {
        let existing = vec![stored(5, 1, "2025-01-06 08:00", Some("2025-01-06 17:00"))];
        let err =
            resolve_attendance(1, AttendanceType::CheckOut, at("2025-01-06 18:00"), &existing)
                .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_weekend_is_rejected_for_both_kinds() {
        // 2025-01-04 is a Saturday
        for kind in [AttendanceType::CheckIn, AttendanceType::CheckOut] {
            let err = resolve_attendance(1, kind, at("2025-01-04 09:00"), &[]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(
                err.to_string(),
                "attendance can only be submitted on weekdays"
            );
        }
    }
}
