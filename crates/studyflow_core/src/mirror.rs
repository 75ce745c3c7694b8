//! In-memory mirror of one persisted collection.
//!
//! # Responsibility
//! - Hold the single writable in-process copy of a collection.
//! - Keep the mirror and the store in lockstep.
//!
//! # Invariants
//! - Persist-then-commit: `replace_all` writes the store first and swaps the
//!   in-memory copy only after the write succeeded. A failed write leaves the
//!   mirror exactly as it was.
//! - The id generator is seeded from every id ever loaded or committed, so
//!   ids are not reused after deletes.

use crate::model::{IdGenerator, Record, RecordId};
use crate::store::{KeyValueStore, RecordStore, StoreResult};
use log::{debug, info};

pub struct Mirror<T: Record, S: KeyValueStore> {
    store: RecordStore<S>,
    key: String,
    records: Vec<T>,
    ids: IdGenerator,
}

impl<T: Record, S: KeyValueStore> Mirror<T, S> {
    /// Builds the mirror from whatever the store currently holds under `key`.
    pub fn load(store: RecordStore<S>, key: impl Into<String>) -> Self {
        let key = key.into();
        let records: Vec<T> = store.load(&key);
        let ids = IdGenerator::seeded(records.iter().map(Record::id));
        info!(
            "event=mirror_load module=mirror status=ok key={key} records={}",
            records.len()
        );
        Self {
            store,
            key,
            records,
            ids,
        }
    }

    /// Read-only view of the current records in insertion order.
    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn find(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Allocates an id unique across this collection's lifetime.
    pub fn next_id(&mut self) -> RecordId {
        self.ids.next_id()
    }

    /// Persists `records` as the whole collection, then adopts them.
    pub fn replace_all(&mut self, records: Vec<T>) -> StoreResult<()> {
        self.store.save(&self.key, &records)?;
        self.records = records;
        Ok(())
    }

    /// Replaces the in-memory copy with what the store holds now.
    ///
    /// Picks up writes made through other handles on the same store. Ids
    /// already handed out stay retired.
    pub fn reload(&mut self) {
        self.records = self.store.load(&self.key);
        self.ids.observe(self.records.iter().map(Record::id));
        debug!(
            "event=mirror_reload module=mirror status=ok key={} records={}",
            self.key,
            self.records.len()
        );
    }

    /// Removes the persisted value and empties the mirror.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.store.clear(&self.key)?;
        self.records.clear();
        Ok(())
    }
}
