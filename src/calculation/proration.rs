//! Salary proration.
//!
//! A payslip's salary component is the base salary scaled by the fraction of
//! working days the employee was present. Fractional currency units are
//! discarded, not rounded.

use crate::models::AuditStep;

/// The result of a proration calculation, including audit step.
#[derive(Debug, Clone)]
pub struct ProrationResult {
    /// The prorated salary.
    pub prorated_salary: i64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns `base_salary * attendance_count / total_working_days` with
/// truncating division, or 0 when the period has no working days.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::prorate;
///
/// assert_eq!(prorate(5_000_000, 20, 22), 4_545_454);
/// assert_eq!(prorate(5_000_000, 20, 0), 0);
/// ```
pub fn prorate(base_salary: i64, attendance_count: u32, total_working_days: u32) -> i64 {
    if total_working_days == 0 {
        return 0;
    }
    let scaled =
        i128::from(base_salary) * i128::from(attendance_count) / i128::from(total_working_days);
    i64::try_from(scaled).unwrap_or(if scaled < 0 { i64::MIN } else { i64::MAX })
}

/// Calculates the prorated salary and records the rule application.
///
/// # Arguments
///
/// * `base_salary` - The employee's monthly base salary
/// * `attendance_count` - Days present within the period
/// * `total_working_days` - Weekdays within the period
/// * `step_number` - Position of this step in the run's audit trace
pub fn calculate_prorated_salary(
    base_salary: i64,
    attendance_count: u32,
    total_working_days: u32,
    step_number: u32,
) -> ProrationResult {
    let prorated_salary = prorate(base_salary, attendance_count, total_working_days);

    let reasoning = if total_working_days == 0 {
        "Period has no working days; prorated salary is 0".to_string()
    } else {
        format!(
            "{} x {} / {} = {} (fractional units discarded)",
            base_salary, attendance_count, total_working_days, prorated_salary
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_proration".to_string(),
        rule_name: "Salary Proration".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary,
            "attendance_count": attendance_count,
            "total_working_days": total_working_days
        }),
        output: serde_json::json!({
            "prorated_salary": prorated_salary
        }),
        reasoning,
    };

    ProrationResult {
        prorated_salary,
        audit_step,
    }
}
