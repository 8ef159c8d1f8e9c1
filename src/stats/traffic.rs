//! Per-user traffic metering.

use dashmap::DashMap;
use std::collections::HashMap;

use crate::node::UserId;

/// Kilobytes recorded for a single transfer of `bytes`.
///
/// Rounding is per call: `floor(bytes / 1024) + 1`. A 500 byte transfer
/// counts as 1 KB and a 1024 byte transfer as 2 KB.
pub fn bytes_to_kb(bytes: u64) -> i64 {
    (bytes / 1024) as i64 + 1
}

/// Accumulates kilobytes per user between drains.
///
/// Backed by a sharded map: increments for unrelated users rarely contend,
/// and an increment holds its shard lock for the whole read-modify-write.
#[derive(Debug, Default)]
pub struct TrafficMeter {
    ledger: DashMap<UserId, i64>,
}

impl TrafficMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `bytes` (rounded per [`bytes_to_kb`]) to the user's running total.
    pub fn record(&self, user_id: &str, bytes: u64) {
        let kb = bytes_to_kb(bytes);
        match self.ledger.get_mut(user_id) {
            Some(mut total) => *total += kb,
            None => *self.ledger.entry(user_id.to_string()).or_insert(0) += kb,
        }
    }

    /// Take the whole ledger and leave it empty.
    ///
    /// Each entry is removed under its shard lock, so an increment either
    /// lands in the returned map or in a fresh entry for the next drain.
    pub fn drain(&self) -> HashMap<UserId, i64> {
        let keys: Vec<UserId> = self.ledger.iter().map(|e| e.key().clone()).collect();
        let mut drained = HashMap::with_capacity(keys.len());

        for key in keys {
            if let Some((user_id, kb)) = self.ledger.remove(&key) {
                drained.insert(user_id, kb);
            }
        }

        drained
    }

    /// Current total for one user without draining.
    pub fn get(&self, user_id: &str) -> Option<i64> {
        self.ledger.get(user_id).map(|kb| *kb)
    }

    /// Number of users with pending traffic.
    pub fn user_count(&self) -> usize {
        self.ledger.len()
    }
}
