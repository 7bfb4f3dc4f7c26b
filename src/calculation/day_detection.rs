//! Day detection and working-day counting.
//!
//! This module determines the day type (weekday, Saturday, Sunday) of a date
//! and counts the working days of an attendance period.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{AttendancePeriod, AuditStep};

/// Represents the type of day for attendance and overtime rules.
///
/// Attendance may only be submitted on weekdays, and weekday overtime has a
/// start-hour restriction that weekend overtime does not.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::DayType;
///
/// let day_type = DayType::Saturday;
/// assert_eq!(format!("{:?}", day_type), "Saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayType {
    /// Returns true for Saturday and Sunday.
    pub fn is_weekend(self) -> bool {
        !matches!(self, DayType::Weekday)
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
        }
    }
}

/// Determines the day type for a given date.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::{get_day_type, DayType};
/// use chrono::NaiveDate;
///
/// // 2025-01-04 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2025, 1, 4).unwrap();
/// assert_eq!(get_day_type(saturday), DayType::Saturday);
///
/// // 2025-01-06 is a Monday
/// let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// assert_eq!(get_day_type(monday), DayType::Weekday);
/// ```
pub fn get_day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// Returns true when `date` falls Monday through Friday.
pub fn is_working_day(date: NaiveDate) -> bool {
    get_day_type(date) == DayType::Weekday
}

/// Counts the Monday–Friday dates in the inclusive range `[start, end]`.
///
/// Returns 0 when `start > end`.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::count_working_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// assert_eq!(count_working_days(start, end), 23);
/// ```
pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| is_working_day(*date))
        .fold(0, |count, _| count + 1)
}

/// The working-day count of a period, including audit step.
#[derive(Debug, Clone)]
pub struct WorkingDaysResult {
    /// Number of weekdays in the period.
    pub total_working_days: u32,
    /// The audit step recording this count.
    pub audit_step: AuditStep,
}

/// Counts the working days of `period` and records the rule application.
pub fn calculate_working_days(period: &AttendancePeriod, step_number: u32) -> WorkingDaysResult {
    let total_working_days = count_working_days(period.start_date, period.end_date);

    let audit_step = AuditStep {
        step_number,
        rule_id: "working_days".to_string(),
        rule_name: "Working Day Count".to_string(),
        input: serde_json::json!({
            "start_date": period.start_date.to_string(),
            "end_date": period.end_date.to_string()
        }),
        output: serde_json::json!({
            "total_working_days": total_working_days
        }),
        reasoning: format!(
            "{} Monday-Friday dates between {} and {} inclusive",
            total_working_days, period.start_date, period.end_date
        ),
    };

    WorkingDaysResult {
        total_working_days,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    // ==========================================================================
    // Day types
    // ==========================================================================
    #[test]
    fn test_every_weekday_is_weekday() {
        // 2025-01-06 is a Monday
        for day in ["2025-01-06", "2025-01-07", "2025-01-08", "2025-01-09", "2025-01-10"] {
            assert_eq!(get_day_type(make_date(day)), DayType::Weekday, "{day}");
            assert!(is_working_day(make_date(day)));
        }
    }

    #[test]
    fn test_weekend_days() {
        assert_eq!(get_day_type(make_date("2025-01-11")), DayType::Saturday);
        assert_eq!(get_day_type(make_date("2025-01-12")), DayType::Sunday);
        assert!(DayType::Saturday.is_weekend());
        assert!(DayType::Sunday.is_weekend());
        assert!(!DayType::Weekday.is_weekend());
    }

    #[test]
    fn test_day_type_display() {
        assert_eq!(format!("{}", DayType::Weekday), "Weekday");
        assert_eq!(format!("{}", DayType::Saturday), "Saturday");
        assert_eq!(format!("{}", DayType::Sunday), "Sunday");
    }

    #[test]
    fn test_day_type_serialization() {
        let json = serde_json::to_string(&DayType::Sunday).unwrap();
        assert_eq!(json, "\"sunday\"");
    }

    // ==========================================================================
    // Working-day counts
    // ==========================================================================
    #[test]
    fn test_january_2025_has_23_working_days() {
        assert_eq!(
            count_working_days(make_date("2025-01-01"), make_date("2025-01-31")),
            23
        );
    }

    #[test]
    fn test_single_day_ranges() {
        // Friday
        assert_eq!(count_working_days(make_date("2025-01-10"), make_date("2025-01-10")), 1);
        // Saturday
        assert_eq!(count_working_days(make_date("2025-01-11"), make_date("2025-01-11")), 0);
    }

    #[test]
    fn test_weekend_only_range_has_no_working_days() {
        assert_eq!(count_working_days(make_date("2025-01-11"), make_date("2025-01-12")), 0);
    }

    #[test]
    fn test_inverted_range_counts_zero() {
        assert_eq!(count_working_days(make_date("2025-01-31"), make_date("2025-01-01")), 0);
    }

    #[test]
    fn test_full_week() {
        assert_eq!(count_working_days(make_date("2025-01-06"), make_date("2025-01-12")), 5);
    }

    #[test]
    fn test_calculate_working_days_audit_step() {
        let period = AttendancePeriod::new(make_date("2025-02-01"), make_date("2025-02-28"));
        let result = calculate_working_days(&period, 1);
        assert_eq!(result.total_working_days, 20);
        assert_eq!(result.audit_step.rule_id, "working_days");
        assert_eq!(result.audit_step.step_number, 1);
        assert_eq!(result.audit_step.output["total_working_days"], 20);
    }
}
