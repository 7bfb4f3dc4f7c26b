//! Request bodies for the payslip engine API.
//!
//! Overtime and reimbursement bodies reuse
//! [`OvertimeSubmission`](crate::service::OvertimeSubmission) and
//! [`ReimbursementSubmission`](crate::service::ReimbursementSubmission).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::AttendanceType;

/// Body of the create and update attendance period endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
}

/// Body of the run payroll endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPayrollRequest {
    /// The period to process.
    pub attendance_period_id: i64,
}

/// Body of the attendance endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// `check_in` or `check_out`.
    #[serde(rename = "type")]
    pub kind: AttendanceType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{OvertimeSubmission, ReimbursementSubmission};

    #[test]
    fn test_deserialize_period_request() {
        let json = r#"{"start_date": "2025-01-01", "end_date": "2025-01-31"}"#;
        let request: PeriodRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.end_date,
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_deserialize_attendance_request() {
        let request: AttendanceRequest = serde_json::from_str(r#"{"type": "check_out"}"#).unwrap();
        assert_eq!(request.kind, AttendanceType::CheckOut);

        assert!(serde_json::from_str::<AttendanceRequest>(r#"{"type": "lunch"}"#).is_err());
    }

    #[test]
    fn test_deserialize_submissions() {
        let json = r#"{"start_at": "2025-01-06T18:00:00", "end_at": "2025-01-06T20:30:00"}"#;
        let overtime: OvertimeSubmission = serde_json::from_str(json).unwrap();
        assert!(overtime.description.is_empty());

        let json = r#"{"amount": 150000, "date": "2025-01-10", "description": "taxi"}"#;
        let claim: ReimbursementSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(claim.amount, 150_000);
    }
}
