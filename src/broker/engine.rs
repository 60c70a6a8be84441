//! Broker engine
//!
//! This module contains the broker implementation responsible for:
//! - allocating contiguous message id blocks for the single topic
//! - persisting message bodies through the `MessageStore` seam
//! - fanning published ids out to every live subscription
//! - serving pull/ack/unsubscribe against per-subscription unacked state
//!
//! Concurrency and usage notes:
//! - All operations are synchronous and safe to call from any number of
//!   threads; the broker is shared as `Arc<Broker>` by the transport
//!   layer.
//! - Store I/O is never performed while holding the topic lock, the
//!   registry lock, or a subscription's queue lock.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::broker::registry::SubscriptionRegistry;
use crate::broker::topic::Topic;
use crate::persistence::{MessageStore, StoredMessage};
use crate::utils::error::Result;

/// The broker ties the topic's id allocation, the subscription registry
/// and the message store together, and defines the consistency contract
/// between concurrent publish, pull, ack and unsubscribe calls.
pub struct Broker {
    topic: Topic,
    registry: SubscriptionRegistry,
    store: Arc<dyn MessageStore>,
}

impl Broker {
    /// Creates a broker over the given message store.
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self {
            topic: Topic::new(),
            registry: SubscriptionRegistry::new(),
            store,
        }
    }

    /// Stores each body under a freshly allocated id and delivers the ids
    /// to every live subscription. Returns the allocated id range.
    ///
    /// If the store rejects a body, the whole publish aborts: no
    /// subscription sees any id from the range, and the reserved ids are
    /// never handed out again. Bodies stored before the failure are not
    /// rolled back.
    pub fn publish(&self, bodies: &[String]) -> Result<Range<u64>> {
        let base = self.topic.reserve_ids(bodies.len());
        let ids = base..base + bodies.len() as u64;

        let published_at = Utc::now().timestamp_millis();
        for (id, body) in ids.clone().zip(bodies) {
            let record = StoredMessage {
                body: body.clone(),
                published_at,
            };
            self.store.put(id, &record)?;
        }

        self.registry.fan_out(ids.clone());
        debug!(
            "published {} message(s) as ids {}..{}",
            bodies.len(),
            ids.start,
            ids.end
        );
        Ok(ids)
    }

    /// Returns up to `max_messages` of the oldest unacknowledged messages
    /// for the subscription, keyed by id.
    ///
    /// Pulling never acknowledges: with no intervening ack, repeated pulls
    /// return the same ids. Referencing an unknown subscription name
    /// creates it.
    pub fn pull(&self, sub_name: &str, max_messages: usize) -> Result<BTreeMap<u64, String>> {
        let sub = self.registry.resolve(sub_name)?;
        let ids = sub.peek_smallest(max_messages);
        let records = self.store.get_batch(&ids)?;
        Ok(records
            .into_iter()
            .map(|(id, record)| (id, record.body))
            .collect())
    }

    /// Acknowledges the listed ids for the subscription. Ids that are not
    /// pending (never delivered, or already acked) are ignored, so acking
    /// is idempotent. Referencing an unknown subscription name creates it.
    pub fn ack(&self, sub_name: &str, ids: &[u64]) -> Result<()> {
        let sub = self.registry.resolve(sub_name)?;
        sub.remove_set(ids);
        Ok(())
    }

    /// Destroys the subscription and all its pending state. The name is
    /// resolved first so invalid names are rejected exactly like in every
    /// other operation; unsubscribing a name that was never referenced
    /// succeeds and leaves nothing behind.
    pub fn unsubscribe(&self, sub_name: &str) -> Result<()> {
        self.registry.resolve(sub_name)?;
        self.registry.destroy(sub_name);
        Ok(())
    }
}
