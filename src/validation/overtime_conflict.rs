//! Overtime submission rules and conflict detection.
//!
//! A submission is checked in a fixed order and the first violated rule wins:
//!
//! 1. the interval must be non-empty
//! 2. a single submission may not exceed the daily cap
//! 3. weekday overtime may not start before the configured hour
//! 4. the interval may not overlap an existing one (half-open, touching is fine)
//! 5. existing overtime starting on the same date plus the new duration may
//!    not exceed the daily cap (reaching it exactly is fine)
//!
//! Every violation is a validation error.

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::calculation::{DayType, get_day_type};
use crate::config::PayrollPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::Overtime;

/// Checks the rules that depend only on the submitted interval.
pub fn validate_overtime_window(
    start: NaiveDateTime,
    end: NaiveDateTime,
    policy: &PayrollPolicy,
) -> EngineResult<()> {
    if end <= start {
        return Err(EngineError::validation("end time must be after start time"));
    }

    let cap = policy.max_overtime_per_day();
    if end - start > cap {
        return Err(EngineError::validation(format!(
            "maximum overtime per day is {} hours",
            policy.max_overtime_hours_per_day
        )));
    }

    if get_day_type(start.date()) == DayType::Weekday
        && start.hour() < policy.weekday_overtime_start_hour
    {
        return Err(EngineError::validation(format!(
            "overtime on weekdays must start at or after {:02}:00",
            policy.weekday_overtime_start_hour
        )));
    }

    Ok(())
}

/// Checks the new interval against the employee's existing overtime.
pub fn ensure_no_overtime_conflict(
    existing: &[Overtime],
    start: NaiveDateTime,
    end: NaiveDateTime,
    policy: &PayrollPolicy,
) -> EngineResult<()> {
    if let Some(clash) = existing.iter().find(|o| o.overlaps(start, end)) {
        tracing::debug!(overtime_id = clash.id, "overtime overlap detected");
        return Err(EngineError::validation(
            "overtime period overlaps with existing overtime",
        ));
    }

    let day = start.date();
    let booked = existing
        .iter()
        .filter(|o| o.date() == day)
        .fold(Duration::zero(), |sum, o| sum + o.duration());
    if booked + (end - start) > policy.max_overtime_per_day() {
        return Err(EngineError::validation(format!(
            "total overtime for the day cannot exceed {} hours",
            policy.max_overtime_hours_per_day
        )));
    }

    Ok(())
}

/// Runs every overtime rule in order.
///
/// `existing` must hold the submitting employee's overtime records only.
///
/// # Example
///
/// ```
/// use payslip_engine::config::PayrollPolicy;
/// use payslip_engine::models::Overtime;
/// use payslip_engine::validation::validate_overtime;
/// use chrono::NaiveDateTime;
///
/// let at = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let existing = vec![Overtime::new(1, at("2025-01-06 18:00"), at("2025-01-06 20:00"), "")];
/// let policy = PayrollPolicy::default();
///
/// // Touching the existing interval is accepted.
/// assert!(validate_overtime(&existing, at("2025-01-06 20:00"), at("2025-01-06 21:00"), &policy).is_ok());
/// // Overlapping it is rejected.
/// assert!(validate_overtime(&existing, at("2025-01-06 19:00"), at("2025-01-06 21:00"), &policy).is_err());
/// ```
pub fn validate_overtime(
    existing: &[Overtime],
    start: NaiveDateTime,
    end: NaiveDateTime,
    policy: &PayrollPolicy,
) -> EngineResult<()> {
    validate_overtime_window(start, end, policy)?;
    ensure_no_overtime_conflict(existing, start, end, policy)
}
