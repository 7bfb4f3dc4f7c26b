//! Overtime pay calculation.
//!
//! Overtime is paid per whole hour at a multiple of the hourly rate derived
//! from the monthly base salary. The hourly rate divides by the policy's
//! nominal month (22 days of 8 hours by default), not by the period's actual
//! working-day count.

use crate::config::PayrollPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendancePeriod, AuditStep, Overtime};

/// The result of an overtime pay calculation, including audit step.
#[derive(Debug, Clone)]
pub struct OvertimePayResult {
    /// Whole overtime hours counted in the period.
    pub total_hours: i64,
    /// Overtime compensation for the period.
    pub total_pay: i64,
    /// The hourly rate the pay was derived from.
    pub hourly_rate: i64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Derives the hourly rate from a monthly base salary.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::hourly_rate;
/// use payslip_engine::config::PayrollPolicy;
///
/// // 5,000,000 / (22 x 8)
/// assert_eq!(hourly_rate(5_000_000, &PayrollPolicy::default()), 28_409);
/// ```
pub fn hourly_rate(base_salary: i64, policy: &PayrollPolicy) -> i64 {
    let divisor = policy.hourly_rate_divisor();
    if divisor == 0 {
        return 0;
    }
    base_salary / divisor
}

/// Sums overtime hours and pay for records whose start date lies within the
/// period.
///
/// Each record contributes `floor(duration in hours)` hours, paid at
/// `hours x hourly_rate x overtime_multiplier`. Records outside the period are
/// ignored. Pay outside the `i64` range is an error.
///
/// # Arguments
///
/// * `overtimes` - The employee's overtime records
/// * `base_salary` - The employee's monthly base salary
/// * `period` - The attendance period being paid
/// * `policy` - Rate divisor and overtime multiplier
/// * `step_number` - Position of this step in the run's audit trace
pub fn calculate_overtime_pay(
    overtimes: &[Overtime],
    base_salary: i64,
    period: &AttendancePeriod,
    policy: &PayrollPolicy,
    step_number: u32,
) -> EngineResult<OvertimePayResult> {
    let rate = hourly_rate(base_salary, policy);

    let mut total_hours: i64 = 0;
    let mut total_pay: i64 = 0;
    let mut counted = 0;
    for overtime in overtimes.iter().filter(|o| period.contains_date(o.date())) {
        let hours = overtime.duration().num_hours();
        let pay = hours
            .checked_mul(rate)
            .and_then(|p| p.checked_mul(policy.overtime_multiplier))
            .ok_or_else(EngineError::amount_out_of_range)?;
        total_hours = total_hours
            .checked_add(hours)
            .ok_or_else(EngineError::amount_out_of_range)?;
        total_pay = total_pay
            .checked_add(pay)
            .ok_or_else(EngineError::amount_out_of_range)?;
        counted += 1;
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Pay".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary,
            "records_in_period": counted,
            "hourly_rate_divisor": policy.hourly_rate_divisor(),
            "overtime_multiplier": policy.overtime_multiplier
        }),
        output: serde_json::json!({
            "hourly_rate": rate,
            "total_hours": total_hours,
            "total_pay": total_pay
        }),
        reasoning: format!(
            "{} whole hours x {} x {} = {}",
            total_hours, rate, policy.overtime_multiplier, total_pay
        ),
    };

    Ok(OvertimePayResult {
        total_hours,
        total_pay,
        hourly_rate: rate,
        audit_step,
    })
}
