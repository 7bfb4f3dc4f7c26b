//! Wall-clock access.
//!
//! Attendance, overtime and reimbursement rules all depend on "now". The
//! engine reads it through [`Clock`] so tests can pin it to a known instant.

use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of the current local wall time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Production clock backed by the system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a fixed instant.
///
/// # Example
///
/// ```
/// use payslip_engine::clock::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let clock = FixedClock::new(at);
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    /// Creates a clock that always reports `at`.
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }
}
