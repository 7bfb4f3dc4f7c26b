//! Attendance period model.
//!
//! This module contains the [`AttendancePeriod`] type, the admin-defined date
//! range a payroll run is computed over.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An admin-defined, inclusive date range over which payroll is computed.
///
/// No two stored periods may overlap.
///
/// # Example
///
/// ```
/// use payslip_engine::models::AttendancePeriod;
/// use chrono::NaiveDate;
///
/// let period = AttendancePeriod::new(
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
/// );
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePeriod {
    /// Store-assigned identifier (0 until persisted).
    pub id: i64,
    /// The first date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl AttendancePeriod {
    /// Creates an unsaved period.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: 0,
            start_date,
            end_date,
        }
    }

    /// Checks if a given date falls within this period.
    ///
    /// The check is inclusive of both start and end dates.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::models::AttendancePeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = AttendancePeriod::new(
    ///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
    /// );
    ///
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())); // start date
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap())); // end date
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())); // before
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if `[start, end]` shares at least one date with this period.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn january() -> AttendancePeriod {
        AttendancePeriod::new(date("2025-01-01"), date("2025-01-31"))
    }

    #[test]
    fn test_contains_date_on_boundaries() {
        let period = january();
        assert!(period.contains_date(period.start_date));
        assert!(period.contains_date(period.end_date));
    }

    #[test]
    fn test_contains_date_outside_period() {
        let period = january();
        assert!(!period.contains_date(date("2025-02-02")));
        assert!(!period.contains_date(date("2024-12-31")));
    }

    #[test]
    fn test_overlaps_is_inclusive() {
        let period = january();
        // Touching on a single shared date counts as overlap.
        assert!(period.overlaps(date("2025-01-31"), date("2025-02-28")));
        assert!(period.overlaps(date("2024-12-01"), date("2025-01-01")));
        assert!(!period.overlaps(date("2025-02-01"), date("2025-02-28")));
    }

    #[test]
    fn test_overlaps_when_containing() {
        let period = january();
        assert!(period.overlaps(date("2024-12-01"), date("2025-03-01")));
        assert!(period.overlaps(date("2025-01-10"), date("2025-01-12")));
    }

    #[test]
    fn test_deserialize_period() {
        let json = r#"{"id": 3, "start_date": "2025-01-01", "end_date": "2025-01-31"}"#;
        let period: AttendancePeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.id, 3);
        assert_eq!(period.end_date, date("2025-01-31"));
    }
}
