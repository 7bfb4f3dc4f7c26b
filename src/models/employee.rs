//! Account and employee models.
//!
//! An [`Account`] is a login identity; an [`Employee`] is the payroll record
//! attached one-to-one to an account.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The role an account acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages attendance periods and runs payroll.
    Admin,
    /// Submits attendance, overtime and reimbursements.
    Employee,
}

impl Role {
    /// Parses a role name as sent by the identity layer.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "employee" | "default" => Some(Role::Employee),
            _ => None,
        }
    }

    /// The canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A login identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier (0 until persisted).
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// The account's role.
    pub role: Role,
}

/// The payroll record of an account.
///
/// # Example
///
/// ```
/// use payslip_engine::models::Employee;
///
/// let employee = Employee::new(7, 5_000_000);
/// assert_eq!(employee.user_id, 7);
/// assert_eq!(employee.id, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Store-assigned identifier (0 until persisted).
    pub id: i64,
    /// The owning account. Unique across employees.
    pub user_id: i64,
    /// Monthly base salary in whole currency units.
    pub base_salary: i64,
}

impl Employee {
    /// Creates an unsaved employee for the given account.
    pub fn new(user_id: i64, base_salary: i64) -> Self {
        Self {
            id: 0,
            user_id,
            base_salary,
        }
    }
}
