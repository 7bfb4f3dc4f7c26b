//! Reimbursement submission.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{PayrollEngine, resolve_employee};
use crate::error::{EngineError, EngineResult};
use crate::models::{Principal, Reimbursement};
use crate::store::{AuditRecorder, Repository};
use crate::validation::validate_reimbursement;

/// A request to claim an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReimbursementSubmission {
    /// Claimed amount in currency units.
    pub amount: i64,
    /// When the expense was incurred.
    pub date: NaiveDate,
    /// What the expense was for.
    #[serde(default)]
    pub description: String,
}

impl PayrollEngine {
    /// Records a reimbursement claim for the principal's employee.
    pub fn submit_reimbursement(
        &self,
        principal: &Principal,
        submission: ReimbursementSubmission,
    ) -> EngineResult<Reimbursement> {
        let now = self.clock.now();
        let reimbursement = self.store.transaction(|db| {
            let employee = resolve_employee(db, principal)?;
            validate_reimbursement(
                submission.amount,
                submission.date,
                now.date(),
                self.policy.reimbursement_amounts,
            )?;
            let reimbursement = db.reimbursements.create(Reimbursement::new(
                employee.id,
                submission.amount,
                submission.date,
                submission.description,
            ))?;
            AuditRecorder::new(principal, now).record_create(&mut db.audit_logs, &reimbursement)?;
            Ok::<_, EngineError>(reimbursement)
        })?;

        info!(
            employee_id = reimbursement.employee_id,
            reimbursement_id = reimbursement.id,
            amount = reimbursement.amount,
            "reimbursement submitted"
        );
        Ok(reimbursement)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::fixtures::*;
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::{PayrollPolicy, ReimbursementAmountPolicy};
    use crate::error::ErrorKind;
    use crate::store::MemoryStore;

    fn claim(amount: i64, day: &str) -> ReimbursementSubmission {
        ReimbursementSubmission {
            amount,
            date: date(day),
            description: "client lunch".to_string(),
        }
    }

    #[test]
    fn test_submit_reimbursement() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-01-15 12:00");
        let john = employee(&engine, "john_doe", 5_000_000);

        let created = engine
            .submit_reimbursement(&john, claim(150_000, "2025-01-15"))
            .unwrap();
        assert_eq!(created.amount, 150_000);
        assert_eq!(created.description, "client lunch");
    }

    #[test]
    fn test_future_date_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-01-15 12:00");
        let john = employee(&engine, "john_doe", 5_000_000);

        let err = engine
            .submit_reimbursement(&john, claim(150_000, "2025-01-16"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_negative_amount_follows_policy() {
        let store = Arc::new(MemoryStore::new());
        let lenient = engine_at(&store, "2025-01-15 12:00");
        let john = employee(&lenient, "john_doe", 5_000_000);
        assert!(lenient.submit_reimbursement(&john, claim(-5_000, "2025-01-10")).is_ok());

        let strict = PayrollEngine::new(
            Arc::clone(&store),
            Arc::new(FixedClock::new(at("2025-01-15 12:00"))),
            PayrollPolicy {
                reimbursement_amounts: ReimbursementAmountPolicy::PositiveOnly,
                ..PayrollPolicy::default()
            },
        );
        let err = strict
            .submit_reimbursement(&john, claim(0, "2025-01-10"))
            .unwrap_err();
        assert_eq!(err.to_string(), "reimbursement amount must be greater than 0");
    }

    #[test]
    fn test_missing_employee_is_reported_before_validation() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-01-15 12:00");
        let admin = admin(&engine);

        let err = engine
            .submit_reimbursement(&admin, claim(150_000, "2025-01-16"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "employee not found");
    }
}
