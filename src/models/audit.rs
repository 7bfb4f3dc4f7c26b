//! Audit models.
//!
//! Two kinds of audit data live here: the calculation trace returned with a
//! payroll run ([`AuditTrace`], [`AuditStep`], [`AuditWarning`]), and the
//! persisted mutation log ([`AuditLogEntry`]).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use payslip_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "salary_proration".to_string(),
///     rule_name: "Salary Proration".to_string(),
///     input: serde_json::json!({"base_salary": 5000000, "attendance_count": 20, "total_working_days": 22}),
///     output: serde_json::json!({"prorated_salary": 4545454}),
///     reasoning: "5000000 x 20 / 22, fractional units discarded".to_string(),
/// };
/// assert_eq!(step.output["prorated_salary"], 4545454);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a payroll run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The kind of mutation an audit log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A record was inserted.
    Create,
    /// A record was modified.
    Update,
}

/// A persisted record of one mutation, written by the use-case layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Store-assigned identifier (0 until persisted).
    pub id: i64,
    /// The table that was mutated.
    pub table: String,
    /// The mutated record's id.
    pub record_id: i64,
    /// Whether the record was created or updated.
    pub action: AuditAction,
    /// Changed fields before the update. `None` for creates.
    pub data_before: Option<serde_json::Value>,
    /// Changed fields after the update, or the full record for creates.
    pub data_after: Option<serde_json::Value>,
    /// The acting account, when known.
    pub user_id: Option<i64>,
    /// The acting client's address, when known.
    pub ip_address: Option<String>,
    /// When the mutation was recorded.
    pub created_at: NaiveDateTime,
}
