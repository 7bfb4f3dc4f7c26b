//! Attendance period date checks.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::AttendancePeriod;

/// Rejects a range whose start is after its end. Single-day periods are valid.
pub fn validate_period_dates(start: NaiveDate, end: NaiveDate) -> EngineResult<()> {
    if start > end {
        return Err(EngineError::validation("start date must be before end date"));
    }
    Ok(())
}

/// Rejects `[start, end]` when it overlaps any existing period other than
/// `exclude_id`.
///
/// The test is inclusive: periods sharing a single boundary date overlap.
///
/// # Example
///
/// ```
/// use payslip_engine::models::AttendancePeriod;
/// use payslip_engine::validation::ensure_no_overlap;
/// use chrono::NaiveDate;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
/// let existing = vec![AttendancePeriod { id: 1, start_date: d(1, 1), end_date: d(1, 31) }];
///
/// assert!(ensure_no_overlap(&existing, d(1, 31), d(2, 28), None).is_err());
/// assert!(ensure_no_overlap(&existing, d(2, 1), d(2, 28), None).is_ok());
/// // A period never conflicts with itself.
/// assert!(ensure_no_overlap(&existing, d(1, 5), d(1, 31), Some(1)).is_ok());
/// ```
pub fn ensure_no_overlap(
    existing: &[AttendancePeriod],
    start: NaiveDate,
    end: NaiveDate,
    exclude_id: Option<i64>,
) -> EngineResult<()> {
    let clash = existing
        .iter()
        .filter(|p| Some(p.id) != exclude_id)
        .find(|p| p.overlaps(start, end));

    match clash {
        Some(period) => {
            tracing::warn!(
                existing_period_id = period.id,
                start = %start,
                end = %end,
                "attendance period overlap rejected"
            );
            Err(EngineError::conflict(
                "attendance period overlaps with an existing period",
            ))
        }
        None => Ok(()),
    }
}
