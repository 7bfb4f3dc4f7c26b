//! Transactional in-memory store.

use std::sync::Mutex;

use crate::models::{
    Account, Attendance, AttendancePeriod, AuditLogEntry, Employee, Overtime, Payroll, Payslip,
    Reimbursement,
};

use super::{Entity, StoreError, Table};

/// Every table the engine persists.
#[derive(Debug, Clone, Default)]
pub struct Database {
    /// Login identities.
    pub accounts: Table<Account>,
    /// Payroll records of accounts.
    pub employees: Table<Employee>,
    /// Admin-defined payroll periods.
    pub attendance_periods: Table<AttendancePeriod>,
    /// Daily check-in/check-out records.
    pub attendances: Table<Attendance>,
    /// Submitted overtime intervals.
    pub overtimes: Table<Overtime>,
    /// Submitted expense claims.
    pub reimbursements: Table<Reimbursement>,
    /// Payroll runs.
    pub payrolls: Table<Payroll>,
    /// Per-employee payroll results.
    pub payslips: Table<Payslip>,
    /// Mutation history.
    pub audit_logs: Table<AuditLogEntry>,
}

impl Database {
    fn begin(&mut self) {
        self.for_each_table(Tx::Begin);
    }

    fn commit(&mut self) {
        self.for_each_table(Tx::Commit);
    }

    fn rollback(&mut self) {
        self.for_each_table(Tx::Rollback);
    }

    fn for_each_table(&mut self, tx: Tx) {
        tx.apply(&mut self.accounts);
        tx.apply(&mut self.employees);
        tx.apply(&mut self.attendance_periods);
        tx.apply(&mut self.attendances);
        tx.apply(&mut self.overtimes);
        tx.apply(&mut self.reimbursements);
        tx.apply(&mut self.payrolls);
        tx.apply(&mut self.payslips);
        tx.apply(&mut self.audit_logs);
    }
}

#[derive(Debug, Clone, Copy)]
enum Tx {
    Begin,
    Commit,
    Rollback,
}

impl Tx {
    fn apply<T: Entity>(self, table: &mut Table<T>) {
        match self {
            Tx::Begin => table.begin(),
            Tx::Commit => table.commit(),
            Tx::Rollback => table.rollback(),
        }
    }
}

/// A [`Database`] behind a lock, mutated only through transactions.
///
/// A transaction holds the lock for its whole duration, so read-then-write
/// checks never interleave with another writer. Tables journal the writes
/// made inside it; an `Err` from the closure undoes them, an `Ok` keeps them.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
/// use payslip_engine::models::AttendancePeriod;
/// use payslip_engine::store::{MemoryStore, Repository};
/// use chrono::NaiveDate;
///
/// let store = MemoryStore::new();
/// let result: Result<(), EngineError> = store.transaction(|db| {
///     db.attendance_periods.create(AttendancePeriod::new(
///         NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
///     ))?;
///     Err(EngineError::validation("abort"))
/// });
///
/// assert!(result.is_err());
/// assert_eq!(store.read(|db| db.attendance_periods.len()).unwrap(), 0);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Database>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose committed state is `database`.
    pub fn from_database(database: Database) -> Self {
        Self {
            inner: Mutex::new(database),
        }
    }

    /// A copy of the committed state.
    pub fn snapshot(&self) -> Result<Database, StoreError> {
        self.read(Database::clone)
    }

    /// Runs `f` with shared access to the committed state.
    pub fn read<R, F>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&Database) -> R,
    {
        let guard = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&guard))
    }

    /// Runs `f` as a serialized, all-or-nothing transaction.
    pub fn transaction<R, E, F>(&self, f: F) -> Result<R, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut Database) -> Result<R, E>,
    {
        let mut guard = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        guard.begin();
        match f(&mut *guard) {
            Ok(result) => {
                guard.commit();
                Ok(result)
            }
            Err(error) => {
                guard.rollback();
                Err(error)
            }
        }
    }
}
