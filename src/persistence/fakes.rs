//! In-memory message stores for tests.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::utils::error::StoreError;

use super::{MessageStore, StoredMessage};

/// Plain in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<u64, StoredMessage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }
}

impl MessageStore for MemoryStore {
    fn put(&self, id: u64, record: &StoredMessage) -> Result<(), StoreError> {
        self.records.lock().insert(id, record.clone());
        Ok(())
    }

    fn get(&self, id: u64) -> Result<StoredMessage, StoreError> {
        self.records
            .lock()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }
}

/// Store that fails exactly one put (the `fail_at`-th one, zero-based) and
/// otherwise behaves like `MemoryStore`.
#[derive(Debug)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_at: usize,
    puts_seen: Mutex<usize>,
}

impl FailingStore {
    pub fn fail_at(fail_at: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_at,
            puts_seen: Mutex::new(0),
        }
    }
}

impl MessageStore for FailingStore {
    fn put(&self, id: u64, record: &StoredMessage) -> Result<(), StoreError> {
        let mut puts_seen = self.puts_seen.lock();
        let seq = *puts_seen;
        *puts_seen += 1;
        if seq == self.fail_at {
            return Err(StoreError::Backend(sled::Error::Unsupported(
                "injected put failure".to_string(),
            )));
        }
        self.inner.put(id, record)
    }

    fn get(&self, id: u64) -> Result<StoredMessage, StoreError> {
        self.inner.get(id)
    }
}
