//! The `persistence` module provides the durable message store behind the
//! broker.
//!
//! Every published body is stored permanently under its message id; pulls
//! read bodies back out, and acknowledging a message does not delete it.
//! The broker consumes the store through the `MessageStore` trait so tests
//! can substitute in-memory implementations, while production uses `sled`
//! as an embedded key-value store.

pub mod sled_store;

#[cfg(test)]
pub mod fakes;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::utils::error::StoreError;

pub use sled_store::SledMessageStore;

/// A message body together with the instant it was published, as kept in
/// the store.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StoredMessage {
    pub body: String,
    pub published_at: i64,
}

/// Durable id-to-message storage.
///
/// `put` must make the record readable by every later `get` of the same
/// id. The broker never exposes an id to a subscription before `put` for
/// that id has returned.
pub trait MessageStore: Send + Sync {
    /// Durably associates `record` with `id`.
    fn put(&self, id: u64, record: &StoredMessage) -> Result<(), StoreError>;

    /// Reads the record stored under `id`.
    fn get(&self, id: u64) -> Result<StoredMessage, StoreError>;

    /// Reads every listed id, failing on the first missing one.
    fn get_batch(&self, ids: &[u64]) -> Result<HashMap<u64, StoredMessage>, StoreError> {
        let mut records = HashMap::with_capacity(ids.len());
        for &id in ids {
            records.insert(id, self.get(id)?);
        }
        Ok(records)
    }
}
