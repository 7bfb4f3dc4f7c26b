//! Overtime model.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An overtime interval submitted by an employee.
///
/// Intervals are half-open: `[start_at, end_at)`.
///
/// # Example
///
/// ```
/// use payslip_engine::models::Overtime;
/// use chrono::{Duration, NaiveDateTime};
///
/// let at = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let overtime = Overtime::new(1, at("2025-01-06 18:00"), at("2025-01-06 20:00"), "release");
///
/// assert_eq!(overtime.duration(), Duration::hours(2));
/// assert!(!overtime.overlaps(at("2025-01-06 20:00"), at("2025-01-06 21:00")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overtime {
    /// Store-assigned identifier (0 until persisted).
    pub id: i64,
    /// The employee who worked the overtime.
    pub employee_id: i64,
    /// Start of the interval.
    pub start_at: NaiveDateTime,
    /// End of the interval (exclusive).
    pub end_at: NaiveDateTime,
    /// What the overtime was for.
    pub description: String,
}

impl Overtime {
    /// Creates an unsaved overtime record.
    pub fn new(
        employee_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            employee_id,
            start_at,
            end_at,
            description: description.into(),
        }
    }

    /// Length of the interval.
    pub fn duration(&self) -> Duration {
        self.end_at - self.start_at
    }

    /// The calendar date the overtime is attributed to.
    pub fn date(&self) -> NaiveDate {
        self.start_at.date()
    }

    /// Half-open overlap test. Touching endpoints do not overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end_at && end > self.start_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_overlap_partial() {
        let existing = Overtime::new(1, at("2025-01-06 19:00"), at("2025-01-06 21:00"), "");
        assert!(existing.overlaps(at("2025-01-06 18:00"), at("2025-01-06 20:00")));
    }

    #[test]
    fn test_touching_does_not_overlap() {
        let existing = Overtime::new(1, at("2025-01-06 18:00"), at("2025-01-06 20:00"), "");
        assert!(!existing.overlaps(at("2025-01-06 20:00"), at("2025-01-06 21:00")));
        assert!(!existing.overlaps(at("2025-01-06 17:00"), at("2025-01-06 18:00")));
    }

    #[test]
    fn test_overlap_contained() {
        let existing = Overtime::new(1, at("2025-01-06 18:00"), at("2025-01-06 21:00"), "");
        assert!(existing.overlaps(at("2025-01-06 19:00"), at("2025-01-06 19:30")));
    }

    #[test]
    fn test_date_follows_start() {
        let overnight = Overtime::new(1, at("2025-01-06 23:00"), at("2025-01-07 01:00"), "");
        assert_eq!(overnight.date(), at("2025-01-06 00:00").date());
        assert_eq!(overnight.duration(), Duration::hours(2));
    }
}
