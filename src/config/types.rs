//! Configuration types for the payslip engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Role;

/// Whether reimbursement amounts must be strictly positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReimbursementAmountPolicy {
    /// Zero and negative amounts are accepted (corrections).
    #[default]
    AllowAny,
    /// Amounts must be greater than zero.
    PositiveOnly,
}

/// Business rules that drive payroll and submission checks.
///
/// Every field has a default, so a partial `policy.yaml` only needs to list
/// what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollPolicy {
    /// Days per month assumed when deriving the hourly rate.
    pub working_days_per_month: i64,
    /// Hours per day assumed when deriving the hourly rate.
    pub working_hours_per_day: i64,
    /// Overtime pay multiplier applied to the hourly rate.
    pub overtime_multiplier: i64,
    /// Cap on overtime hours per calendar day, and per submission.
    pub max_overtime_hours_per_day: i64,
    /// Earliest hour (local) weekday overtime may start.
    pub weekday_overtime_start_hour: u32,
    /// Sign rule for reimbursement amounts.
    pub reimbursement_amounts: ReimbursementAmountPolicy,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            working_days_per_month: 22,
            working_hours_per_day: 8,
            overtime_multiplier: 2,
            max_overtime_hours_per_day: 3,
            weekday_overtime_start_hour: 17,
            reimbursement_amounts: ReimbursementAmountPolicy::AllowAny,
        }
    }
}

impl PayrollPolicy {
    /// The overtime cap as a duration.
    pub fn max_overtime_per_day(&self) -> Duration {
        Duration::hours(self.max_overtime_hours_per_day)
    }

    /// Divisor turning a monthly salary into an hourly rate.
    pub fn hourly_rate_divisor(&self) -> i64 {
        self.working_days_per_month
            .saturating_mul(self.working_hours_per_day)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> EngineResult<()> {
        if self.working_days_per_month <= 0 {
            return Err(invalid("working_days_per_month", "must be greater than 0"));
        }
        if self.working_hours_per_day <= 0 {
            return Err(invalid("working_hours_per_day", "must be greater than 0"));
        }
        if self.overtime_multiplier < 0 {
            return Err(invalid("overtime_multiplier", "must not be negative"));
        }
        if self.max_overtime_hours_per_day <= 0 {
            return Err(invalid(
                "max_overtime_hours_per_day",
                "must be greater than 0",
            ));
        }
        if self.weekday_overtime_start_hour > 23 {
            return Err(invalid(
                "weekday_overtime_start_hour",
                "must be an hour between 0 and 23",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidPolicy {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Payroll business rules.
    pub policy: PayrollPolicy,
    /// HTTP listener settings.
    pub server: ServerConfig,
}

/// One account to create when bootstrapping an empty store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedAccount {
    /// Login name.
    pub username: String,
    /// Role of the account.
    pub role: Role,
    /// Monthly base salary; accounts without one get no employee record.
    #[serde(default)]
    pub base_salary: Option<i64>,
}

/// Seed file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeedData {
    /// Accounts to create.
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,
}
