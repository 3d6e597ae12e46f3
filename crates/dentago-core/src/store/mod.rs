//! Local key/value persistence.
//!
//! Screens never touch a storage backend directly; they go through the
//! `KeyValueStore` port with keys from `StorageKey`.

mod keys;
mod memory;
mod schema;
mod session;
mod sqlite;

pub use keys::*;
pub use memory::*;
pub use schema::*;
pub use session::*;
pub use sqlite::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// String key/value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: StorageKey) -> StoreResult<Option<String>>;
    fn set(&self, key: StorageKey, value: &str) -> StoreResult<()>;
    fn remove(&self, key: StorageKey) -> StoreResult<()>;
}

/// Read and decode a JSON value.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: StorageKey,
) -> StoreResult<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: StorageKey,
    value: &T,
) -> StoreResult<()> {
    store.set(key, &serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        let loaded: Option<Vec<String>> = load_json(&store, StorageKey::ReviewedDoctors).unwrap();
        assert!(loaded.is_none());

        save_json(&store, StorageKey::ReviewedDoctors, &["a", "b"]).unwrap();
        let loaded: Option<Vec<String>> = load_json(&store, StorageKey::ReviewedDoctors).unwrap();
        assert_eq!(loaded, Some(vec!["a".to_string(), "b".to_string()]));

        store.set(StorageKey::ReviewedDoctors, "not json").unwrap();
        let loaded: StoreResult<Option<Vec<String>>> = load_json(&store, StorageKey::ReviewedDoctors);
        assert!(matches!(loaded, Err(StoreError::Json(_))));
    }
}
