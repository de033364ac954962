//! Durable key-value persistence for the practice collections.
//!
//! Each collection lives in one string slot, serialized as a single JSON
//! document and rewritten whole on every mutation. Slot keys carry a
//! schema version; a format change gets a new key instead of a
//! migration.

mod memory;
mod sqlite;

pub use memory::*;
pub use sqlite::*;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

/// Slot holding the patient collection.
pub const PATIENTS_SLOT: &str = "pueri_patients_v6";
/// Slot holding the practitioner collection.
pub const PRACTITIONERS_SLOT: &str = "pueri_profs_v6";
/// Slot holding the notes list.
pub const NOTES_SLOT: &str = "pueri_todos_v1";

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// String-keyed durable store the session reads and writes through.
pub trait KvStore {
    /// Read a slot; `None` when it was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrite a slot.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// Load a collection from its slot.
///
/// Absent, unreadable, and corrupt slots all degrade to the empty
/// collection so startup never fails on bad saved data.
pub fn load_slot<T>(store: &dyn KvStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!(key, %err, "slot read failed; starting empty");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, %err, "slot corrupt; starting empty");
            T::default()
        }
    }
}

/// Serialize a collection into its slot, replacing previous contents.
pub fn save_slot<T>(store: &mut dyn KvStore, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
