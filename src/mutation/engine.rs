//! Mutation engine
//!
//! Each operation opens one unit of work, stages every entry of the batch
//! and commits once. A rejected commit leaves the table untouched.

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::records::{PartialRecord, Record};
use crate::store::{RecordStore, UnitOfWork};

use super::batch::PatchBatch;
use super::errors::{MutationError, MutationResult};
use super::outcome::{BatchOutcome, MutationOutcome};

/// Batched create, update and delete over one table
pub struct MutationEngine<'a, R, S> {
    store: &'a S,
    _record: PhantomData<R>,
}

impl<'a, R: Record, S: RecordStore<R>> MutationEngine<'a, R, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Creates one record per entry.
    ///
    /// Each record starts from its default and takes the entry's present
    /// fields. Supplied identifiers are ignored; the store assigns new ones.
    pub fn create(&self, batch: &[R::Patch]) -> MutationResult<MutationOutcome> {
        if batch.is_empty() {
            return Err(MutationError::EmptyBatch);
        }

        let registry = R::registry();
        let mut session = self.store.begin()?;
        for entry in batch {
            let mut record = R::default();
            registry.apply(&mut record, entry.assignments())?;
            session.insert(record);
        }
        self.commit(session, "create")?;

        debug!(target: "cereal::mutation", kind = %R::KIND, created = batch.len(), "Create committed");
        Ok(MutationOutcome::created(batch.len()))
    }

    /// Merges each entry's present fields into the stored record.
    ///
    /// Entries without an identifier, and identifiers with no stored record,
    /// are skipped. A record is counted when its final value differs from
    /// the one stored before the batch.
    pub fn update(&self, batch: &[R::Patch]) -> MutationResult<MutationOutcome> {
        if batch.is_empty() {
            return Err(MutationError::EmptyBatch);
        }

        let registry = R::registry();
        let mut session = self.store.begin()?;
        let mut originals: HashMap<Uuid, R> = HashMap::new();
        let mut skipped = 0usize;

        for entry in batch {
            let Some(id) = entry.id() else {
                skipped += 1;
                continue;
            };
            let Some(stored) = session.find(id).cloned() else {
                skipped += 1;
                continue;
            };

            let mut merged = stored.clone();
            registry.apply(&mut merged, entry.assignments())?;
            if merged != stored {
                originals.entry(id).or_insert(stored);
                session.replace(merged);
            }
        }

        // a row counts only if it differs from its value at session start
        let changed = originals
            .iter()
            .filter(|(id, original)| session.find(**id) != Some(*original))
            .count();
        self.commit(session, "update")?;

        debug!(
            target: "cereal::mutation",
            kind = %R::KIND,
            updated = changed,
            skipped,
            "Update committed"
        );
        Ok(MutationOutcome::updated(changed))
    }

    /// Deletes records by identifier.
    ///
    /// Nil identifiers are dropped and duplicates collapsed; unknown
    /// identifiers are not counted.
    pub fn delete(&self, ids: &[Uuid]) -> MutationResult<MutationOutcome> {
        if ids.is_empty() {
            return Err(MutationError::EmptyBatch);
        }

        let mut seen = HashSet::new();
        let targets: Vec<Uuid> = ids
            .iter()
            .copied()
            .filter(|id| !id.is_nil() && seen.insert(*id))
            .collect();

        let mut session = self.store.begin()?;
        let removed = targets.iter().filter(|id| session.remove(**id)).count();
        self.commit(session, "delete")?;

        debug!(
            target: "cereal::mutation",
            kind = %R::KIND,
            requested = ids.len(),
            deleted = removed,
            "Delete committed"
        );
        Ok(MutationOutcome::deleted(removed))
    }

    /// Runs a legacy mixed batch: deletes, then updates, then creates.
    ///
    /// Groups commit independently; a later group failing does not undo an
    /// earlier one. Empty groups are not executed and report no outcome.
    pub fn apply_mixed(&self, batch: PatchBatch<R::Patch>) -> MutationResult<BatchOutcome> {
        if batch.is_empty() {
            return Err(MutationError::EmptyBatch);
        }

        let groups = batch.split();
        let mut outcomes = Vec::with_capacity(3);
        if !groups.deletes.is_empty() {
            outcomes.push(self.delete(&groups.deletes)?);
        }
        if !groups.updates.is_empty() {
            outcomes.push(self.update(&groups.updates)?);
        }
        if !groups.creates.is_empty() {
            outcomes.push(self.create(&groups.creates)?);
        }
        Ok(BatchOutcome(outcomes))
    }

    fn commit(&self, session: S::Session<'a>, operation: &str) -> MutationResult<()> {
        session.commit().map_err(|err| {
            warn!(target: "cereal::mutation", kind = %R::KIND, operation, error = %err, "Commit rejected");
            MutationError::from(err)
        })
    }
}
