//! In-memory store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyValueStore, StorageKey, StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StorageKey) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> StoreResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get(StorageKey::AccessToken).unwrap(), None);

        store.set(StorageKey::AccessToken, "tok").unwrap();
        assert_eq!(store.get(StorageKey::AccessToken).unwrap().as_deref(), Some("tok"));

        store.remove(StorageKey::AccessToken).unwrap();
        assert_eq!(store.get(StorageKey::AccessToken).unwrap(), None);
        store.remove(StorageKey::AccessToken).unwrap();
    }
}
