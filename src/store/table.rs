//! In-memory table with auto-increment ids and a unique index.
//!
//! Writes made between [`Table::begin`] and [`Table::commit`] are journaled
//! so that [`Table::rollback`] can undo them in reverse order.

use std::collections::{BTreeMap, HashMap};

use super::{Entity, Repository, StoreError, StoreResult};

/// Rows of one entity type keyed by id.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<i64, T>,
    unique: HashMap<String, i64>,
    next_id: i64,
    journal: Option<Journal<T>>,
}

#[derive(Debug, Clone)]
struct Journal<T> {
    next_id: i64,
    undo: Vec<Undo<T>>,
}

#[derive(Debug, Clone)]
enum Undo<T> {
    Inserted { id: i64, key: Option<String> },
    Replaced { previous: T },
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            unique: HashMap::new(),
            next_id: 1,
            journal: None,
        }
    }
}

impl<T: Entity> Table<T> {
    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates rows in id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// Starts journaling writes. A pending journal is discarded.
    pub(super) fn begin(&mut self) {
        self.journal = Some(Journal {
            next_id: self.next_id,
            undo: Vec::new(),
        });
    }

    /// Keeps every write since [`Table::begin`].
    pub(super) fn commit(&mut self) {
        self.journal = None;
    }

    /// Undoes every write since [`Table::begin`], newest first.
    pub(super) fn rollback(&mut self) {
        let Some(journal) = self.journal.take() else {
            return;
        };
        for undo in journal.undo.into_iter().rev() {
            match undo {
                Undo::Inserted { id, key } => {
                    self.rows.remove(&id);
                    if let Some(key) = key {
                        self.unique.remove(&key);
                    }
                }
                Undo::Replaced { previous } => {
                    let id = previous.id();
                    let previous_key = previous.unique_key();
                    let current_key = self.rows.get(&id).and_then(|row| row.unique_key());
                    if current_key != previous_key {
                        if let Some(key) = current_key {
                            self.unique.remove(&key);
                        }
                        if let Some(key) = previous_key {
                            self.unique.insert(key, id);
                        }
                    }
                    self.rows.insert(id, previous);
                }
            }
        }
        self.next_id = journal.next_id;
    }

    fn journal(&mut self, undo: Undo<T>) {
        if let Some(journal) = &mut self.journal {
            journal.undo.push(undo);
        }
    }

    fn violation(key: String) -> StoreError {
        StoreError::UniqueViolation {
            table: T::TABLE,
            key,
        }
    }
}

impl<T: Entity> Repository<T> for Table<T> {
    fn create(&mut self, mut record: T) -> StoreResult<T> {
        let key = record.unique_key();
        if let Some(key) = &key {
            if self.unique.contains_key(key) {
                return Err(Self::violation(key.clone()));
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        record.assign_id(id);

        if let Some(key) = &key {
            self.unique.insert(key.clone(), id);
        }
        self.rows.insert(id, record.clone());
        self.journal(Undo::Inserted { id, key });
        Ok(record)
    }

    fn update<F>(&mut self, id: i64, change: F) -> StoreResult<T>
    where
        F: FnOnce(&mut T),
    {
        let current = self.rows.get(&id).ok_or(StoreError::RecordNotFound {
            table: T::TABLE,
            id,
        })?;

        let mut updated = current.clone();
        change(&mut updated);
        updated.assign_id(id);

        let old_key = current.unique_key();
        let new_key = updated.unique_key();
        if old_key != new_key {
            if let Some(key) = &new_key {
                if self.unique.get(key).is_some_and(|owner| *owner != id) {
                    return Err(Self::violation(key.clone()));
                }
            }
            if let Some(key) = old_key {
                self.unique.remove(&key);
            }
            if let Some(key) = new_key {
                self.unique.insert(key, id);
            }
        }

        if let Some(previous) = self.rows.insert(id, updated.clone()) {
            self.journal(Undo::Replaced { previous });
        }
        Ok(updated)
    }

    fn find_by_id(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn find_by<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows.values().filter(|r| predicate(r)).cloned().collect()
    }

    fn find_one_by<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows.values().find(|r| predicate(r)).cloned()
    }
}
