//! The use-case layer.
//!
//! [`PayrollEngine`] implements every engine operation on top of the store,
//! the pure calculators and the rule checks. Each mutating operation runs as
//! one store transaction: rule checks read the committed state and the write
//! (plus its audit entry) lands in the same critical section, or nothing does.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use payslip_engine::clock::FixedClock;
//! use payslip_engine::config::PayrollPolicy;
//! use payslip_engine::models::{Principal, Role};
//! use payslip_engine::service::PayrollEngine;
//! use payslip_engine::store::MemoryStore;
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let engine = PayrollEngine::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(FixedClock::new(now)),
//!     PayrollPolicy::default(),
//! );
//!
//! let (admin, _) = engine.register_account("admin", Role::Admin, None).unwrap();
//! let principal = Principal::new(admin.id, Role::Admin);
//! let period = engine
//!     .create_attendance_period(
//!         &principal,
//!         NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
//!     )
//!     .unwrap();
//! assert_eq!(period.id, 1);
//! ```

mod attendance;
mod attendance_period;
mod overtime;
mod payroll;
mod reimbursement;
mod summary;

pub use overtime::OvertimeSubmission;
pub use payroll::RunStage;
pub use reimbursement::ReimbursementSubmission;

use std::sync::Arc;

use tracing::info;

use crate::clock::Clock;
use crate::config::{PayrollPolicy, SeedData};
use crate::error::{EngineError, EngineResult};
use crate::models::{Account, AuditLogEntry, Employee, Principal, Role};
use crate::store::{AuditRecorder, Database, MemoryStore, Repository};

/// Entry point for every payroll operation.
#[derive(Debug, Clone)]
pub struct PayrollEngine {
    store: Arc<MemoryStore>,
    clock: Arc<dyn Clock>,
    policy: PayrollPolicy,
}

impl PayrollEngine {
    /// Creates an engine over `store`, reading time from `clock`.
    pub fn new(store: Arc<MemoryStore>, clock: Arc<dyn Clock>, policy: PayrollPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// The payroll policy in effect.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Creates an account and, when `base_salary` is given, its employee
    /// record.
    pub fn register_account(
        &self,
        username: &str,
        role: Role,
        base_salary: Option<i64>,
    ) -> EngineResult<(Account, Option<Employee>)> {
        let username = username.trim();
        if username.is_empty() {
            return Err(EngineError::validation("username is required"));
        }
        if base_salary.is_some_and(|salary| salary < 0) {
            return Err(EngineError::validation("base salary must not be negative"));
        }

        let now = self.clock.now();
        let (account, employee) = self.store.transaction(|db| {
            let audit = AuditRecorder::system(now);
            let account = db.accounts.create(Account {
                id: 0,
                username: username.to_string(),
                role,
            })?;
            audit.record_create(&mut db.audit_logs, &account)?;

            let employee = match base_salary {
                Some(salary) => {
                    let employee = db.employees.create(Employee::new(account.id, salary))?;
                    audit.record_create(&mut db.audit_logs, &employee)?;
                    Some(employee)
                }
                None => None,
            };
            Ok::<_, EngineError>((account, employee))
        })?;

        info!(
            user_id = account.id,
            username = %account.username,
            role = ?account.role,
            employee_id = employee.as_ref().map(|e| e.id),
            "account registered"
        );
        Ok((account, employee))
    }

    /// Registers the seed accounts when the store holds no accounts yet.
    ///
    /// Returns the number of accounts created.
    pub fn seed(&self, seed: &SeedData) -> EngineResult<usize> {
        if !self.store.read(|db| db.accounts.is_empty())? {
            info!("store already populated, skipping seed");
            return Ok(0);
        }
        for account in &seed.accounts {
            self.register_account(&account.username, account.role, account.base_salary)?;
        }
        info!(accounts = seed.accounts.len(), "seed data loaded");
        Ok(seed.accounts.len())
    }

    /// Every audit log entry in insertion order.
    pub fn audit_log(&self) -> EngineResult<Vec<AuditLogEntry>> {
        Ok(self.store.read(|db| db.audit_logs.iter().cloned().collect())?)
    }
}

/// Admin operations require both the caller's claimed role and the stored
/// account role to be admin.
fn require_admin(db: &Database, principal: &Principal) -> EngineResult<()> {
    let stored_admin = db
        .accounts
        .find_by_id(principal.user_id)
        .is_some_and(|account| account.role == Role::Admin);
    if principal.is_admin() && stored_admin {
        Ok(())
    } else {
        tracing::warn!(user_id = principal.user_id, "admin operation denied");
        Err(EngineError::Forbidden {
            message: "admin role required".to_string(),
        })
    }
}

fn resolve_employee(db: &Database, principal: &Principal) -> EngineResult<Employee> {
    db.employees
        .find_one_by(|e| e.user_id == principal.user_id)
        .ok_or_else(|| EngineError::not_found("employee"))
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::config::SeedAccount;
    use crate::error::ErrorKind;
    use crate::models::AuditAction;

    #[test]
    fn test_register_account_with_employee() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-01-06 09:00");

        let (account, employee) = engine
            .register_account("john_doe", Role::Employee, Some(5_000_000))
            .unwrap();
        let employee = employee.unwrap();
        assert_eq!(employee.user_id, account.id);
        assert_eq!(employee.base_salary, 5_000_000);

        let log = engine.audit_log().unwrap();
        assert_eq!(log.len(), 2);
        assert!(log.iter().all(|e| e.action == AuditAction::Create));
        assert!(log.iter().all(|e| e.user_id.is_none()));
    }

    #[test]
    fn test_register_account_rejects_bad_input() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-01-06 09:00");

        let err = engine.register_account("  ", Role::Employee, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = engine
            .register_account("bob", Role::Employee, Some(-1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_duplicate_username_is_conflict() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-01-06 09:00");
        engine.register_account("jane", Role::Employee, Some(1)).unwrap();

        let err = engine
            .register_account("jane", Role::Admin, None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        // Nothing from the failed transaction is left behind.
        assert_eq!(engine.audit_log().unwrap().len(), 2);
    }

    #[test]
    fn test_seed_runs_once() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-01-06 09:00");
        let seed = SeedData {
            accounts: vec![
                SeedAccount {
                    username: "admin".to_string(),
                    role: Role::Admin,
                    base_salary: None,
                },
                SeedAccount {
                    username: "john_doe".to_string(),
                    role: Role::Employee,
                    base_salary: Some(5_000_000),
                },
            ],
        };

        assert_eq!(engine.seed(&seed).unwrap(), 2);
        assert_eq!(engine.seed(&seed).unwrap(), 0);
        assert_eq!(store.read(|db| db.accounts.len()).unwrap(), 2);
        assert_eq!(store.read(|db| db.employees.len()).unwrap(), 1);
    }

    #[test]
    fn test_require_admin() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-01-06 09:00");
        let admin = admin(&engine);

        store
            .read(|db| {
                assert!(require_admin(db, &admin).is_ok());
                let err = require_admin(db, &Principal::new(admin.user_id, Role::Employee))
                    .unwrap_err();
                assert_eq!(err.kind(), ErrorKind::Auth);
                assert_eq!(err.to_string(), "admin role required");
            })
            .unwrap();
    }

    #[test]
    fn test_require_admin_checks_stored_role() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_at(&store, "2025-01-06 09:00");
        admin(&engine);
        let john = employee(&engine, "john_doe", 5_000_000);

        store
            .read(|db| {
                // An employee claiming the admin role.
                let err = require_admin(db, &Principal::new(john.user_id, Role::Admin)).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::Auth);
                // An account that does not exist.
                assert!(require_admin(db, &Principal::new(99, Role::Admin)).is_err());
            })
            .unwrap();
    }
}
