//! Reimbursement aggregation.

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendancePeriod, AuditStep, Reimbursement};

/// The reimbursements counted for a period, including audit step.
#[derive(Debug, Clone)]
pub struct ReimbursementTotalResult {
    /// Sum of the counted amounts.
    pub total: i64,
    /// The records dated within the period, in input order.
    pub items: Vec<Reimbursement>,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
}

/// Sums the reimbursements dated within `[period.start_date, period.end_date]`.
///
/// Amounts are summed as stored; their sign is not checked here. A sum
/// outside the `i64` range is an error.
pub fn calculate_reimbursement_total(
    reimbursements: &[Reimbursement],
    period: &AttendancePeriod,
    step_number: u32,
) -> EngineResult<ReimbursementTotalResult> {
    let items: Vec<Reimbursement> = reimbursements
        .iter()
        .filter(|r| period.contains_date(r.date))
        .cloned()
        .collect();
    let total = items
        .iter()
        .try_fold(0i64, |sum, r| sum.checked_add(r.amount))
        .ok_or_else(EngineError::amount_out_of_range)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "reimbursement_total".to_string(),
        rule_name: "Reimbursement Total".to_string(),
        input: serde_json::json!({
            "records_submitted": reimbursements.len(),
            "start_date": period.start_date.to_string(),
            "end_date": period.end_date.to_string()
        }),
        output: serde_json::json!({
            "records_in_period": items.len(),
            "total": total
        }),
        reasoning: format!(
            "Summed {} reimbursement(s) dated within the period",
            items.len()
        ),
    };

    Ok(ReimbursementTotalResult {
        total,
        items,
        audit_step,
    })
}
