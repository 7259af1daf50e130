use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use super::KeyValueStore;
use crate::error::StoreError;

/// Thread-safe in-memory store. Clones share the same map, so a test (or a
/// long-lived session) can hand one copy to a controller and inspect another.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. one written by an older client.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.inner.insert(key.into(), value.into());
        store
    }

    /// Current raw value for `key`, without going through the async trait.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|v| v.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
