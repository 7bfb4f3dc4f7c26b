//! Explicit audit logging.
//!
//! Use cases call [`AuditRecorder`] after each successful mutation, inside the
//! same transaction, so a rolled-back write never leaves an audit entry behind.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use crate::models::{AuditAction, AuditLogEntry, Principal};

use super::{Entity, Repository, StoreError, StoreResult, Table};

/// Writes [`AuditLogEntry`] rows on behalf of one actor.
#[derive(Debug, Clone)]
pub struct AuditRecorder<'a> {
    user_id: Option<i64>,
    ip_address: Option<&'a str>,
    at: NaiveDateTime,
}

impl<'a> AuditRecorder<'a> {
    /// Creates a recorder stamping entries with `principal` and `at`.
    pub fn new(principal: &'a Principal, at: NaiveDateTime) -> Self {
        Self {
            user_id: Some(principal.user_id),
            ip_address: principal.ip_address.as_deref(),
            at,
        }
    }

    /// Creates a recorder for writes with no acting user, such as seeding.
    pub fn system(at: NaiveDateTime) -> Self {
        Self {
            user_id: None,
            ip_address: None,
            at,
        }
    }

    /// Records the full snapshot of a newly created record.
    pub fn record_create<T: Entity>(
        &self,
        log: &mut Table<AuditLogEntry>,
        record: &T,
    ) -> StoreResult<AuditLogEntry> {
        let after = snapshot(record)?;
        log.create(self.entry::<T>(record.id(), AuditAction::Create, None, Some(after)))
    }

    /// Records the fields that differ between `before` and `after`.
    pub fn record_update<T: Entity>(
        &self,
        log: &mut Table<AuditLogEntry>,
        before: &T,
        after: &T,
    ) -> StoreResult<AuditLogEntry> {
        let (old, new) = changed_fields(snapshot(before)?, snapshot(after)?);
        log.create(self.entry::<T>(
            after.id(),
            AuditAction::Update,
            Some(old),
            Some(new),
        ))
    }

    fn entry<T: Entity>(
        &self,
        record_id: i64,
        action: AuditAction,
        data_before: Option<Value>,
        data_after: Option<Value>,
    ) -> AuditLogEntry {
        AuditLogEntry {
            id: 0,
            table: T::TABLE.to_string(),
            record_id,
            action,
            data_before,
            data_after,
            user_id: self.user_id,
            ip_address: self.ip_address.map(str::to_string),
            created_at: self.at,
        }
    }
}

fn snapshot<T: Entity>(record: &T) -> StoreResult<Value> {
    serde_json::to_value(record).map_err(|e| StoreError::Snapshot {
        table: T::TABLE,
        message: e.to_string(),
    })
}

/// Keeps only the keys whose values differ. Non-object snapshots are kept
/// whole.
fn changed_fields(before: Value, after: Value) -> (Value, Value) {
    match (before, after) {
        (Value::Object(before), Value::Object(after)) => {
            let mut old = Map::new();
            let mut new = Map::new();
            for (key, value) in after {
                let previous = before.get(&key).cloned().unwrap_or(Value::Null);
                if previous != value {
                    old.insert(key.clone(), previous);
                    new.insert(key, value);
                }
            }
            (Value::Object(old), Value::Object(new))
        }
        (before, after) => (before, after),
    }
}
