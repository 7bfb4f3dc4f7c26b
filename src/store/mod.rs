//! Persistence for the payslip engine.
//!
//! The engine talks to storage through the [`Repository`] contract: create,
//! update, find by id and predicate lookups over one entity type. The
//! in-memory implementation keeps each entity in a [`Table`] with an optional
//! unique key, and [`MemoryStore`] runs every use case as a serialized,
//! all-or-nothing transaction over the whole [`Database`]. Rollback replays
//! each table's undo journal, so a transaction costs only the rows it writes.

mod audit;
mod entities;
mod memory;
mod table;

pub use audit::AuditRecorder;
pub use memory::{Database, MemoryStore};
pub use table::Table;

use thiserror::Error;

/// Storage failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An update referenced a row that does not exist.
    #[error("{table} record {id} not found")]
    RecordNotFound {
        /// The table that was searched.
        table: &'static str,
        /// The missing id.
        id: i64,
    },

    /// A write would have duplicated a unique key.
    #[error("unique constraint violated on {table}: {key}")]
    UniqueViolation {
        /// The table holding the constraint.
        table: &'static str,
        /// The duplicated key.
        key: String,
    },

    /// A record could not be snapshotted for the audit log.
    #[error("failed to snapshot {table} record: {message}")]
    Snapshot {
        /// The table of the record.
        table: &'static str,
        /// The serializer's message.
        message: String,
    },

    /// A previous transaction panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A persistable record.
pub trait Entity: Clone + serde::Serialize {
    /// Table name used in errors and audit entries.
    const TABLE: &'static str;

    /// The record's id (0 before it is stored).
    fn id(&self) -> i64;

    /// Sets the store-assigned id.
    fn assign_id(&mut self, id: i64);

    /// Key that must be unique across the table, if any.
    fn unique_key(&self) -> Option<String> {
        None
    }
}

/// CRUD operations over one entity type.
///
/// Lookups return owned clones; a missing record is `None`, not an error.
pub trait Repository<T: Entity> {
    /// Inserts a record and returns it with its assigned id.
    fn create(&mut self, record: T) -> StoreResult<T>;

    /// Applies `change` to the stored record and returns the updated record.
    fn update<F>(&mut self, id: i64, change: F) -> StoreResult<T>
    where
        F: FnOnce(&mut T);

    /// Finds a record by id.
    fn find_by_id(&self, id: i64) -> Option<T>;

    /// Returns every record matching `predicate`, in id order.
    fn find_by<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool;

    /// Returns the first record matching `predicate`, in id order.
    fn find_one_by<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool;
}
