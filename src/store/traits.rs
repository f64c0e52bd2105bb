//! Storage seams used by the query executor and mutation engine

use uuid::Uuid;

use super::errors::StoreResult;
use crate::records::Record;

/// A table of records of type `R`
pub trait RecordStore<R: Record>: Send + Sync {
    /// Unit of work holding exclusive write access to the table
    type Session<'a>: UnitOfWork<R>
    where
        Self: 'a;

    /// Every record, in storage order
    fn scan(&self) -> StoreResult<Vec<R>>;

    /// The record with the given identifier
    fn get(&self, id: Uuid) -> StoreResult<Option<R>>;

    /// Opens a unit of work. Blocks other writers until it ends.
    fn begin(&self) -> StoreResult<Self::Session<'_>>;
}

/// Staged writes against one table.
///
/// Nothing is visible to readers until [`UnitOfWork::commit`] succeeds.
/// Dropping the session without committing discards every staged write.
pub trait UnitOfWork<R: Record> {
    /// Looks up a record as currently staged
    fn find(&self, id: Uuid) -> Option<&R>;

    /// Stages a new record under a freshly assigned identifier.
    /// Any identifier the record carries is replaced.
    fn insert(&mut self, record: R) -> Uuid;

    /// Stages a replacement for the record with the same identifier.
    /// Returns false when no such record exists.
    fn replace(&mut self, record: R) -> bool;

    /// Stages removal of a record. Returns false when no such record exists.
    fn remove(&mut self, id: Uuid) -> bool;

    /// Validates and publishes every staged write at once
    fn commit(self) -> StoreResult<()>;
}
