use std::collections::HashMap;
use std::sync::RwLock;

use super::{Collection, CollectionStore, PersistenceError};

/// In-memory collection store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<HashMap<Collection, Vec<serde_json::Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CollectionStore for InMemoryStore {
    fn load(&self, collection: Collection) -> Result<Vec<serde_json::Value>, PersistenceError> {
        let map = self.inner.read().map_err(|_| PersistenceError::LockPoisoned)?;
        Ok(map.get(&collection).cloned().unwrap_or_default())
    }

    fn save(
        &self,
        collection: Collection,
        records: &[serde_json::Value],
    ) -> Result<(), PersistenceError> {
        let mut map = self.inner.write().map_err(|_| PersistenceError::LockPoisoned)?;
        map.insert(collection, records.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_collection_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.load(Collection::Stores).unwrap().is_empty());
    }

    #[test]
    fn save_overwrites_whole_collection() {
        let store = InMemoryStore::new();
        store.save(Collection::Stores, &[json!({"id": 1}), json!({"id": 2})]).unwrap();
        store.save(Collection::Stores, &[json!({"id": 3})]).unwrap();

        assert_eq!(store.load(Collection::Stores).unwrap(), vec![json!({"id": 3})]);
        assert!(store.load(Collection::Products).unwrap().is_empty());
    }
}
