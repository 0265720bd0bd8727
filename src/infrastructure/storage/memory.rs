//! In-memory storage implementation

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::KeyValueStore;
use crate::support::errors::InfraError;

/// In-memory byte store for development and testing.
///
/// Writes can be switched to fail so callers' rollback paths can be
/// exercised.
pub struct InMemoryKeyValueStore {
    entries: DashMap<String, Vec<u8>>,
    write_count: AtomicUsize,
    fail_writes: AtomicBool,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            write_count: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `put` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, InfraError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), InfraError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(InfraError::Backend(format!("write to '{}' rejected", key)));
        }
        self.entries.insert(key.to_string(), value);
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), InfraError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.put("k", b"v1".to_vec()).await.unwrap();
        store.put("k", b"v2".to_vec()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"v2".to_vec()));
        assert_eq!(store.write_count(), 2);

        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert!(!store.contains("k"));
    }

    #[tokio::test]
    async fn failing_writes_keep_previous_value() {
        let store = InMemoryKeyValueStore::new();
        store.put("k", b"old".to_vec()).await.unwrap();
        store.set_fail_writes(true);

        assert!(store.put("k", b"new".to_vec()).await.is_err());
        assert_eq!(store.get("k").await.unwrap(), Some(b"old".to_vec()));
        assert_eq!(store.write_count(), 1);
    }
}
