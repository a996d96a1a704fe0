//! In-process key-value store with a byte quota

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{KeyValueStore, StoreError, DEFAULT_QUOTA_BYTES};

pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: usize,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota_bytes,
        }
    }
}

impl Default for MemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write();

        let used = used_bytes(&entries);
        let replaced = entries.get(key).map(|old| key.len() + old.len()).unwrap_or(0);
        let available = self.quota_bytes.saturating_sub(used - replaced);
        let needed = key.len() + value.len();

        if needed > available {
            return Err(StoreError::QuotaExceeded { needed, available });
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}

/// Bytes used by keys and values
fn used_bytes(entries: &HashMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_overwrite() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        store.set("a", "22").unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("22"));
        assert_eq!(store.keys().unwrap().len(), 1);
        assert_eq!(used_bytes(&store.entries.read()), 3);
    }

    #[test]
    fn test_quota_exceeded() {
        let store = MemoryKeyValueStore::with_quota(10);
        store.set("key", "12345").unwrap();

        let err = store.set("other", "123456").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { needed: 11, available: 2 }));

        // Overwriting frees the old value first
        store.set("key", "1234567").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["key".to_string()]);
    }
}
