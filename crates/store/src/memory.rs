//! In-process store used for local runs and tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{RecordStore, StoreError};

/// Keeps inserted records in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<(String, serde_json::Value)>>,
    rejecting: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following insert fail with [`StoreError::Unavailable`].
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    /// Snapshot of the records stored in `collection`.
    pub fn records(&self, collection: &str) -> Vec<serde_json::Value> {
        self.lock()
            .iter()
            .filter(|(name, _)| name == collection)
            .map(|(_, record)| record.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, serde_json::Value)>> {
        // A panic while holding the lock cannot leave a half-written Vec behind.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: &str, record: serde_json::Value) -> Result<(), StoreError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is rejecting inserts".to_string()));
        }

        let mut records = self.lock();
        records.push((collection.to_string(), record));
        tracing::debug!(collection, total = records.len(), "record stored in memory");
        Ok(())
    }
}
