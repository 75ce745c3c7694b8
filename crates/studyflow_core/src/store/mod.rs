//! Persistent store adapter for whole-collection JSON values.
//!
//! # Responsibility
//! - Read and write one named record collection as a JSON array.
//! - Hide the backing key-value store behind `KeyValueStore`.
//!
//! # Invariants
//! - `load` never fails its caller: missing or malformed values read as empty.
//! - `save` replaces the entire stored value in a single write.

use crate::db::DbError;
use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

/// Logical key of the Kanban board collection.
pub const TASKS_KEY: &str = "tasks";
/// Logical key of the study planner collection.
pub const SESSIONS_KEY: &str = "sf_sessions_user1";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while persisting a collection.
#[derive(Debug)]
pub enum StoreError {
    /// Backing database failure.
    Db(DbError),
    /// Collection could not be encoded as JSON.
    Serialize(serde_json::Error),
    /// Write would exceed the store's capacity.
    QuotaExceeded { key: String, needed: usize, quota: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize collection: {err}"),
            Self::QuotaExceeded { key, needed, quota } => write!(
                f,
                "storage quota exceeded for `{key}`: {needed} bytes needed, {quota} available"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Minimal string key-value storage contract.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// JSON collection adapter over a key-value store.
pub struct RecordStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Reads the collection under `key`, treating any problem as empty.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("event=store_load module=store status=recovered key={key} reason=read_failed error={err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Option<Vec<T>>>(&raw) {
            Ok(records) => records.unwrap_or_default(),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=recovered key={key} reason=malformed bytes={} error={err}",
                    raw.len()
                );
                Vec::new()
            }
        }
    }

    /// Serializes and stores the full collection under `key`.
    pub fn save<T: Serialize>(&self, key: &str, records: &[T]) -> StoreResult<()> {
        let encoded = serde_json::to_string(records).map_err(StoreError::Serialize)?;
        self.kv.set(key, &encoded).map_err(|err| {
            error!(
                "event=store_save module=store status=error key={key} records={} error={err}",
                records.len()
            );
            err
        })
    }

    /// Removes the stored collection under `key`.
    pub fn clear(&self, key: &str) -> StoreResult<()> {
        self.kv.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKeyValueStore, RecordStore};

    #[test]
    fn load_treats_missing_malformed_and_null_as_empty() {
        let kv = MemoryKeyValueStore::new();
        let store = RecordStore::new(&kv);
        assert!(store.load::<u32>("missing").is_empty());

        kv.set("broken", "{not json").unwrap();
        assert!(store.load::<u32>("broken").is_empty());

        kv.set("null", "null").unwrap();
        assert!(store.load::<u32>("null").is_empty());

        kv.set("object", "{\"a\":1}").unwrap();
        assert!(store.load::<u32>("object").is_empty());
    }

    #[test]
    fn save_overwrites_whole_value_and_clear_removes_it() {
        let kv = MemoryKeyValueStore::new();
        let store = RecordStore::new(&kv);
        store.save("nums", &[1_u32, 2, 3]).unwrap();
        store.save("nums", &[4_u32]).unwrap();
        assert_eq!(store.load::<u32>("nums"), vec![4]);

        store.clear("nums").unwrap();
        assert_eq!(kv.get("nums").unwrap(), None);
    }
}
