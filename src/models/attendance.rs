//! Attendance model.
//!
//! One [`Attendance`] record exists per employee per calendar day of presence.
//! It is created on check-in and completed on check-out.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The kind of attendance submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceType {
    /// Start of the working day.
    CheckIn,
    /// End of the working day.
    CheckOut,
}

/// A day of presence for an employee.
///
/// # Example
///
/// ```
/// use payslip_engine::models::Attendance;
/// use chrono::NaiveDateTime;
///
/// let clock_in = NaiveDateTime::parse_from_str("2025-01-06 08:55:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let attendance = Attendance::check_in(4, clock_in);
/// assert!(!attendance.is_checked_out());
/// assert_eq!(attendance.clock_in_date(), clock_in.date());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Store-assigned identifier (0 until persisted).
    pub id: i64,
    /// The employee this record belongs to.
    pub employee_id: i64,
    /// When the employee checked in.
    pub clock_in_time: NaiveDateTime,
    /// When the employee checked out, if they have.
    pub clock_out_time: Option<NaiveDateTime>,
}

impl Attendance {
    /// Creates an unsaved, open attendance record.
    pub fn check_in(employee_id: i64, clock_in_time: NaiveDateTime) -> Self {
        Self {
            id: 0,
            employee_id,
            clock_in_time,
            clock_out_time: None,
        }
    }

    /// The calendar date of the check-in.
    pub fn clock_in_date(&self) -> NaiveDate {
        self.clock_in_time.date()
    }

    /// Returns true once a check-out has been recorded.
    pub fn is_checked_out(&self) -> bool {
        self.clock_out_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_type_serialization() {
        assert_eq!(
            serde_json::to_string(&AttendanceType::CheckIn).unwrap(),
            "\"check_in\""
        );
        let parsed: AttendanceType = serde_json::from_str("\"check_out\"").unwrap();
        assert_eq!(parsed, AttendanceType::CheckOut);
    }

    #[test]
    fn test_checked_out_after_clock_out() {
        let clock_in =
            NaiveDateTime::parse_from_str("2025-01-06 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let mut attendance = Attendance::check_in(1, clock_in);
        attendance.clock_out_time = Some(clock_in + chrono::Duration::hours(8));
        assert!(attendance.is_checked_out());
    }
}
