//! In-memory tables
//!
//! Rows live in a `Vec` in insertion order behind a `RwLock`. A session
//! holds the write guard for its whole lifetime and works on a private copy
//! of the rows, which replaces the table only when the commit validates.

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::traits::{RecordStore, UnitOfWork};
use crate::records::Record;

/// One table of records
#[derive(Debug)]
pub struct MemoryTable<R> {
    rows: RwLock<Vec<R>>,
    max_rows: Option<usize>,
}

impl<R: Record> Default for MemoryTable<R> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<R: Record> MemoryTable<R> {
    /// Creates an empty table with an optional row limit
    pub fn new(max_rows: Option<usize>) -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            max_rows,
        }
    }

    /// Creates a table holding the given rows.
    ///
    /// Rows keep the identifiers they carry; rows without one get a fresh
    /// identifier. Every row must satisfy the table constraints.
    pub fn with_rows(mut rows: Vec<R>, max_rows: Option<usize>) -> StoreResult<Self> {
        for row in rows.iter_mut().filter(|row| row.id().is_none()) {
            row.assign_id(Uuid::new_v4());
        }
        let touched = rows.iter().filter_map(Record::id).collect();
        validate(&rows, &touched, max_rows)?;
        Ok(Self {
            rows: RwLock::new(rows),
            max_rows,
        })
    }

    /// Current row count
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<R>>> {
        self.rows
            .read()
            .map_err(|_| StoreError::Unavailable { kind: R::KIND })
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<R>>> {
        self.rows
            .write()
            .map_err(|_| StoreError::Unavailable { kind: R::KIND })
    }
}

impl<R: Record> RecordStore<R> for MemoryTable<R> {
    type Session<'a> = MemorySession<'a, R> where Self: 'a;

    fn scan(&self) -> StoreResult<Vec<R>> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: Uuid) -> StoreResult<Option<R>> {
        Ok(self
            .read()?
            .iter()
            .find(|row| row.id() == Some(id))
            .cloned())
    }

    fn begin(&self) -> StoreResult<MemorySession<'_, R>> {
        let guard = self.write()?;
        let staged = guard.clone();
        Ok(MemorySession {
            guard,
            staged,
            touched: HashSet::new(),
            max_rows: self.max_rows,
        })
    }
}

/// Unit of work over a [`MemoryTable`]
pub struct MemorySession<'a, R> {
    guard: RwLockWriteGuard<'a, Vec<R>>,
    staged: Vec<R>,
    /// Inserted or replaced since the session began
    touched: HashSet<Uuid>,
    max_rows: Option<usize>,
}

impl<R: Record> MemorySession<'_, R> {
    fn position(&self, id: Uuid) -> Option<usize> {
        self.staged.iter().position(|row| row.id() == Some(id))
    }
}

impl<R: Record> UnitOfWork<R> for MemorySession<'_, R> {
    fn find(&self, id: Uuid) -> Option<&R> {
        self.position(id).map(|pos| &self.staged[pos])
    }

    fn insert(&mut self, mut record: R) -> Uuid {
        let id = Uuid::new_v4();
        record.assign_id(id);
        self.staged.push(record);
        self.touched.insert(id);
        id
    }

    fn replace(&mut self, record: R) -> bool {
        let Some(id) = record.id() else {
            return false;
        };
        match self.position(id) {
            Some(pos) => {
                self.staged[pos] = record;
                self.touched.insert(id);
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: Uuid) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.staged.remove(pos);
                self.touched.remove(&id);
                true
            }
            None => false,
        }
    }

    fn commit(mut self) -> StoreResult<()> {
        validate(&self.staged, &self.touched, self.max_rows)?;
        *self.guard = std::mem::take(&mut self.staged);
        Ok(())
    }
}

/// Checks capacity, identifier uniqueness and the constraints of touched rows
fn validate<R: Record>(
    rows: &[R],
    touched: &HashSet<Uuid>,
    max_rows: Option<usize>,
) -> StoreResult<()> {
    if let Some(limit) = max_rows {
        if rows.len() > limit {
            return Err(StoreError::CapacityExceeded {
                kind: R::KIND,
                rows: rows.len(),
                limit,
            });
        }
    }

    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        let Some(id) = row.id() else {
            continue;
        };
        if !seen.insert(id) {
            return Err(StoreError::DuplicateId { kind: R::KIND, id });
        }
        if touched.contains(&id) {
            row.check_constraints()
                .map_err(|reason| StoreError::ConstraintViolation {
                    kind: R::KIND,
                    id,
                    reason,
                })?;
        }
    }
    Ok(())
}
