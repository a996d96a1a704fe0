//! Record persistence
//!
//! Two layers:
//! - [`KeyValueStore`]: a flat string key-value store with prefix scans,
//!   the same surface a browser's `localStorage` offers.
//! - [`RecordStore`]: `save` / `load_all` of verification records. The
//!   shipped [`LocalRecordStore`] keeps each record under
//!   `<prefix><id>` in a key-value store; a remote backend client can
//!   implement the trait instead.

pub mod memory;
pub mod file;
pub mod records;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::VerificationRecord;

pub use memory::MemoryKeyValueStore;
pub use file::FileKeyValueStore;
pub use records::LocalRecordStore;

/// Default key namespace for verification records
pub const STORAGE_PREFIX: &str = "verification:";

/// Default memory quota, matching the usual browser `localStorage` budget
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("quota exceeded: write needs {needed} bytes, {available} available")]
    QuotaExceeded { needed: usize, available: usize },

    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Flat string key-value storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// All keys currently stored, in no particular order
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// Persistence seam for verification records
///
/// Neither operation surfaces an error: failed writes are logged and
/// dropped, unreadable records are skipped.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn save(&self, record: &VerificationRecord);

    /// Every stored record, most recent first
    async fn load_all(&self) -> Vec<VerificationRecord>;
}
