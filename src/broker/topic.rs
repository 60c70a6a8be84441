use parking_lot::Mutex;

/// Holds state information for the (single) topic.
///
/// The only state a topic carries is the next message id to hand out.
/// Ids are allocated in contiguous blocks and never reused, so every id
/// ever assigned is strictly below the current counter value.
#[derive(Debug, Default)]
pub struct Topic {
    next_id: Mutex<u64>,
}

impl Topic {
    /// Creates a new topic with its id counter at zero.
    pub fn new() -> Self {
        Self {
            next_id: Mutex::new(0),
        }
    }

    /// Reserves `count` consecutive message ids and returns the first one.
    ///
    /// Concurrent callers observe disjoint, contiguous blocks. Reserving
    /// zero ids is legal and returns the counter without advancing it.
    pub fn reserve_ids(&self, count: usize) -> u64 {
        let mut next_id = self.next_id.lock();
        let base = *next_id;
        *next_id += count as u64;
        base
    }
}
