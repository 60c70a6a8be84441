use std::collections::BTreeSet;

/// Tracks the message ids that were delivered to one subscription and have
/// not been acknowledged yet.
///
/// Ids live in an ordered set, so the oldest pending ids can be read off
/// the front without sorting and any subset can be removed without index
/// juggling. Insert and remove are both O(log n).
#[derive(Debug, Default)]
pub struct UnackedQueue {
    ids: BTreeSet<u64>,
}

impl UnackedQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }

    /// Marks a message id as pending.
    /// Inserting an id that is already pending has no effect.
    pub fn insert(&mut self, id: u64) {
        self.ids.insert(id);
    }

    /// Returns up to `max` of the smallest pending ids in ascending order,
    /// without removing them. `max = 0` returns an empty vec.
    pub fn peek_smallest(&self, max: usize) -> Vec<u64> {
        self.ids.iter().take(max).copied().collect()
    }

    /// Removes every listed id that is pending. Ids that are not pending,
    /// and duplicates within `ids`, are silently ignored.
    pub fn remove_set(&mut self, ids: &[u64]) {
        for id in ids {
            self.ids.remove(id);
        }
    }

    /// Number of pending ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
