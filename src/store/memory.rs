use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

use super::{Books, Collection, CollectionId, Store, Users, WriteLocks};
use crate::Result;

/// A [`Store`] that keeps every collection as a JSON document in memory.
///
/// Collections go through the same JSON encoding as [`JsonStore`](super::JsonStore), so loaded
/// collections never share state with the values that were saved. Clones share the documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Arc<Mutex<HashMap<CollectionId, String>>>,
    locks: Arc<WriteLocks>,
}

impl MemoryStore {
    /// creates a store with no collections at all
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// creates a store holding the seed records of every collection
    pub fn seeded() -> Result<Self> {
        let store = MemoryStore::new();
        store.save(&Books::seed())?;
        store.save(&Users::seed())?;
        Ok(store)
    }

    /// replaces the stored document of collection `id` with `raw`, valid JSON or not
    pub fn put_raw(&self, id: CollectionId, raw: impl Into<String>) {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, raw.into());
    }
}

impl Store for MemoryStore {
    fn load<C: Collection>(&self) -> C {
        let documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        match documents.get(&C::ID) {
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
                warn!("the stored {} document is invalid, using an empty one: {}", C::ID, e);
                C::default()
            }),
            None => C::default(),
        }
    }

    fn save<C: Collection>(&self, collection: &C) -> Result<()> {
        let json = serde_json::to_string_pretty(collection)?;
        self.put_raw(C::ID, json);
        Ok(())
    }

    fn write_locks(&self) -> &WriteLocks {
        &self.locks
    }
}
