//! Subscription state and the registry that owns it.
//!
//! Subscriptions come into existence the first time any operation
//! references their name, and disappear only on an explicit unsubscribe.
//! Fan-out of freshly published ids reaches exactly the subscriptions that
//! are registered at that moment; anything created later starts empty.
//!
//! Concurrency note: the registry lock guards only the name map. Fan-out
//! snapshots the live subscriptions, releases the registry lock, and then
//! takes one subscription queue lock at a time, so no caller ever holds
//! two locks at once.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use regex::Regex;

use crate::broker::queue::UnackedQueue;
use crate::utils::error::{BrokerError, Result};

static VALID_SUB_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z][A-Za-z0-9_-]*$").expect("subscription name pattern"));

/// A subscription keeps track of received messages that have not yet been
/// acknowledged for a given subscription name.
#[derive(Debug)]
pub struct Subscription {
    pub name: String,
    unacked: RwLock<UnackedQueue>,
}

impl Subscription {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            unacked: RwLock::new(UnackedQueue::new()),
        }
    }

    /// Marks every id in the block as pending for this subscription.
    ///
    /// The queue lock is held across the whole block, so a concurrent peek
    /// sees either none or all of a published batch.
    pub fn enqueue(&self, ids: Range<u64>) {
        let mut unacked = self.unacked.write();
        for id in ids {
            unacked.insert(id);
        }
    }

    /// Returns up to `max` of the smallest pending ids without removing them.
    pub fn peek_smallest(&self, max: usize) -> Vec<u64> {
        self.unacked.read().peek_smallest(max)
    }

    /// Drops the listed ids from the pending set. Ids that are not pending
    /// are ignored.
    pub fn remove_set(&self, ids: &[u64]) {
        self.unacked.write().remove_set(ids);
    }

    /// Number of pending ids.
    pub fn pending_len(&self) -> usize {
        self.unacked.read().len()
    }
}

/// Owns every live subscription and hands out shared references to them.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    subs: RwLock<HashMap<String, Arc<Subscription>>>,
}

impl SubscriptionRegistry {
    /// Creates a registry with no subscriptions.
    pub fn new() -> Self {
        Self {
            subs: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the subscription with `name`, creating it if it does not
    /// exist yet. Every operation that references a subscription goes
    /// through here, which is what makes creation implicit.
    ///
    /// Fails with `InvalidSubscriptionName` before touching any state if
    /// the name does not match `^[A-Za-z][A-Za-z0-9_-]*$`.
    pub fn resolve(&self, name: &str) -> Result<Arc<Subscription>> {
        if !VALID_SUB_NAME.is_match(name) {
            return Err(BrokerError::InvalidSubscriptionName(name.to_string()));
        }

        if let Some(sub) = self.subs.read().get(name) {
            return Ok(sub.clone());
        }

        let mut subs = self.subs.write();
        let sub = subs
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Subscription::new(name)));
        Ok(sub.clone())
    }

    /// Removes the subscription so that state is no longer accumulated for
    /// it. Returns whether a subscription was actually removed.
    pub fn destroy(&self, name: &str) -> bool {
        self.subs.write().remove(name).is_some()
    }

    /// Delivers a block of freshly published ids to every live
    /// subscription. Subscriptions created after the snapshot is taken do
    /// not receive these ids.
    pub fn fan_out(&self, ids: Range<u64>) {
        let snapshot: Vec<Arc<Subscription>> = self.subs.read().values().cloned().collect();
        for sub in snapshot {
            sub.enqueue(ids.clone());
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.subs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.read().is_empty()
    }
}
