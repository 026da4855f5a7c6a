//! Per-node cooldown deadlines.
//!
//! Deadlines are kept on the session clock rather than as detached OS timers,
//! so expiry is polled each tick and a pending cooldown can be cancelled by
//! node identity. Each armed cooldown expires exactly once.

use std::collections::HashMap;
use std::time::Duration;

use flatwalk_core::RoomId;
use tracing::trace;

use crate::node::NodeKey;

/// Tracks which nodes are cooling down and when each re-arms.
#[derive(Debug, Default)]
pub struct CooldownTracker {
    deadlines: HashMap<NodeKey, Duration>,
}

impl CooldownTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a cooldown for `key` unless one is already pending.
    ///
    /// Returns `false` when the node is still cooling down, in which case
    /// the existing deadline is left untouched.
    pub fn try_trigger(&mut self, key: NodeKey, cooldown: Duration, now: Duration) -> bool {
        if self.deadlines.contains_key(&key) {
            return false;
        }
        trace!(?key, ?cooldown, "arming cooldown");
        self.deadlines.insert(key, now + cooldown);
        true
    }

    /// True when `key` has a pending cooldown.
    pub fn is_cooling(&self, key: NodeKey) -> bool {
        self.deadlines.contains_key(&key)
    }

    /// Remove and return every key whose deadline has passed.
    pub fn expire_due(&mut self, now: Duration) -> Vec<NodeKey> {
        let mut due: Vec<NodeKey> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| *key)
            .collect();
        due.sort();
        for key in &due {
            self.deadlines.remove(key);
        }
        due
    }

    /// Cancel a single pending cooldown. Returns whether one was pending.
    pub fn cancel(&mut self, key: NodeKey) -> bool {
        self.deadlines.remove(&key).is_some()
    }

    /// Cancel every pending cooldown in `room`. Returns how many were dropped.
    pub fn cancel_room(&mut self, room: RoomId) -> usize {
        let before = self.deadlines.len();
        self.deadlines.retain(|key, _| key.room != room);
        before - self.deadlines.len()
    }

    /// Number of pending cooldowns.
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    /// True when no cooldowns are pending.
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
