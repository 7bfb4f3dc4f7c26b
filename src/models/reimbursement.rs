//! Reimbursement model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An expense claim paid out with the payroll covering its date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reimbursement {
    /// Store-assigned identifier (0 until persisted).
    pub id: i64,
    /// The claiming employee.
    pub employee_id: i64,
    /// Amount in whole currency units. The sign is governed by policy.
    pub amount: i64,
    /// The date the expense was incurred.
    pub date: NaiveDate,
    /// What the expense was for.
    pub description: String,
}

impl Reimbursement {
    /// Creates an unsaved reimbursement.
    pub fn new(employee_id: i64, amount: i64, date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            employee_id,
            amount,
            date,
            description: description.into(),
        }
    }
}
