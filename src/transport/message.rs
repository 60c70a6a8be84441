use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Query parameters accepted by the pull endpoint.
///
/// `n` deserializes as a `usize`, so a negative or non-integer count is
/// rejected before any handler code runs.
#[derive(Debug, Deserialize)]
pub struct PullParams {
    pub sub: String,
    pub n: usize,
}

/// JSON body returned by the pull endpoint.
///
/// `messages` maps each message id to its body; ids render as decimal
/// strings because JSON object keys are strings. `n_messages` is the
/// number of entries in the map.
#[derive(Debug, Serialize)]
pub struct PullResponse {
    pub n_messages: usize,
    pub messages: BTreeMap<u64, String>,
}

impl PullResponse {
    pub fn new(messages: BTreeMap<u64, String>) -> Self {
        Self {
            n_messages: messages.len(),
            messages,
        }
    }
}
