//! Live handler-task gauge.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts request-handling tasks that are currently running.
#[derive(Debug, Default)]
pub struct LiveTasks {
    active: AtomicUsize,
}

impl LiveTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a task as live until the returned guard is dropped.
    pub fn enter(self: &Arc<Self>) -> TaskGuard {
        self.active.fetch_add(1, Ordering::Relaxed);
        TaskGuard {
            tasks: Arc::clone(self),
        }
    }

    pub fn count(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }
}

/// Decrements the gauge on drop, including when the handler panics.
#[derive(Debug)]
pub struct TaskGuard {
    tasks: Arc<LiveTasks>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.tasks.active.fetch_sub(1, Ordering::Relaxed);
    }
}
