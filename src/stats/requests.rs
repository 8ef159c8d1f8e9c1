//! Global request counter.

use std::sync::atomic::{AtomicI64, Ordering};

/// Requests served since the last drain.
#[derive(Debug, Default)]
pub struct RequestCounter {
    count: AtomicI64,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Read and zero in one step.
    pub fn drain(&self) -> i64 {
        self.count.swap(0, Ordering::AcqRel)
    }

    pub fn get(&self) -> i64 {
        self.count.load(Ordering::Relaxed)
    }
}
