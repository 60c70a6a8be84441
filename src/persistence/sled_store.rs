use std::path::Path;

use sled::{Db, Tree};

use crate::utils::error::StoreError;

use super::{MessageStore, StoredMessage};

const MESSAGES_TREE: &str = "messages";

/// Message store backed by an embedded `sled` database.
///
/// Each message lives in the `messages` tree under its id's big-endian
/// bytes, so on-disk order matches id order. Values are the JSON-encoded
/// `StoredMessage`.
#[derive(Clone)]
pub struct SledMessageStore {
    db: Db,
    tree: Tree,
}

impl SledMessageStore {
    /// Opens (or creates) the database under `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let tree = db.open_tree(MESSAGES_TREE)?;
        Ok(Self { db, tree })
    }

    /// Flushes pending writes to disk. Called once on shutdown.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }
}

impl MessageStore for SledMessageStore {
    fn put(&self, id: u64, record: &StoredMessage) -> Result<(), StoreError> {
        let encoded = serde_json::to_vec(record)?;
        self.tree.insert(id.to_be_bytes(), encoded)?;
        Ok(())
    }

    fn get(&self, id: u64) -> Result<StoredMessage, StoreError> {
        let value = self
            .tree
            .get(id.to_be_bytes())?
            .ok_or(StoreError::NotFound(id))?;
        Ok(serde_json::from_slice(&value)?)
    }
}

impl std::fmt::Debug for SledMessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledMessageStore")
            .field("db", &"sled::Db")
            .finish()
    }
}
