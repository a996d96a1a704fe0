//! Prefix-scanning record store over a key-value backend
//!
//! Backends do blocking I/O, so every call runs on tokio's blocking pool.

use std::sync::Arc;

use async_trait::async_trait;

use super::{KeyValueStore, RecordStore, StoreError, STORAGE_PREFIX};
use crate::models::VerificationRecord;

pub struct LocalRecordStore<K> {
    inner: Arc<Inner<K>>,
}

struct Inner<K> {
    kv: K,
    prefix: String,
}

impl<K> Clone for LocalRecordStore<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: KeyValueStore> LocalRecordStore<K> {
    pub fn new(kv: K) -> Self {
        Self::with_prefix(kv, STORAGE_PREFIX)
    }

    pub fn with_prefix(kv: K, prefix: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                kv,
                prefix: prefix.into(),
            }),
        }
    }

    #[cfg(test)]
    fn backend(&self) -> &K {
        &self.inner.kv
    }
}

impl<K: KeyValueStore> Inner<K> {
    fn key_for(&self, id: &str) -> String {
        format!("{}{}", self.prefix, id)
    }

    fn try_save(&self, record: &VerificationRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)?;
        self.kv.set(&self.key_for(&record.id), &json)
    }

    fn try_load_all(&self) -> Result<Vec<VerificationRecord>, StoreError> {
        let mut records = Vec::new();

        for key in self.kv.keys()? {
            if !key.starts_with(&self.prefix) {
                continue;
            }

            let raw = match self.kv.get(&key) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!("Dropping unreadable record {}: {}", key, e);
                    continue;
                }
            };

            match serde_json::from_str::<VerificationRecord>(&raw) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Dropping unparsable record {}: {}", key, e),
            }
        }

        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }
}

#[async_trait]
impl<K: KeyValueStore + 'static> RecordStore for LocalRecordStore<K> {
    async fn save(&self, record: &VerificationRecord) {
        let inner = Arc::clone(&self.inner);
        let owned = record.clone();

        let result = tokio::task::spawn_blocking(move || inner.try_save(&owned)).await;
        match result {
            Ok(Ok(())) => tracing::debug!("Record saved: {}", record.id),
            Ok(Err(e)) => tracing::error!("Failed to save record {}: {}", record.id, e),
            Err(e) => tracing::error!("Save task for record {} failed: {}", record.id, e),
        }
    }

    async fn load_all(&self) -> Vec<VerificationRecord> {
        let inner = Arc::clone(&self.inner);

        match tokio::task::spawn_blocking(move || inner.try_load_all()).await {
            Ok(Ok(records)) => records,
            Ok(Err(e)) => {
                tracing::error!("Failed to read record store: {}", e);
                Vec::new()
            }
            Err(e) => {
                tracing::error!("Load task failed: {}", e);
                Vec::new()
            }
        }
    }
}
