//! Node state shared with connection handlers.
//!
//! # Data Flow
//! ```text
//! Tunnel handler (external, one task per connection):
//!     → Node::is_authorized(user)      before relaying any bytes
//!     → Node::record_traffic(user, n)  as bytes flow
//!     → Node::record_request()         per accepted HTTP request
//!
//! Sync loop:
//!     → Node::registry().replace_all(..) after each successful push
//! ```
//!
//! # Design Decisions
//! - `Node` is a cheap clone (a bundle of `Arc`s) handed to every handler
//! - None of these operations block beyond a shard lock

pub mod registry;

pub use registry::{AuthorizationRegistry, UserId};

use std::collections::HashMap;
use std::sync::Arc;

use crate::stats::{LiveTasks, RequestCounter, TaskGuard, TrafficMeter};

/// Handle on the node's shared authorization and accounting state.
#[derive(Debug, Clone)]
pub struct Node {
    registry: Arc<AuthorizationRegistry>,
    traffic: Arc<TrafficMeter>,
    requests: Arc<RequestCounter>,
    tasks: Arc<LiveTasks>,
}

impl Node {
    /// Create a node whose registry is seeded with `users`.
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        Self {
            registry: Arc::new(AuthorizationRegistry::new(users)),
            traffic: Arc::new(TrafficMeter::new()),
            requests: Arc::new(RequestCounter::new()),
            tasks: Arc::new(LiveTasks::new()),
        }
    }

    pub fn is_authorized(&self, user_id: &str) -> bool {
        self.registry.is_authorized(user_id)
    }

    pub fn record_traffic(&self, user_id: &str, bytes: u64) {
        self.traffic.record(user_id, bytes);
    }

    pub fn record_request(&self) {
        self.requests.record();
    }

    /// Take the per-user KB ledger, leaving it empty.
    pub fn drain_traffic(&self) -> HashMap<UserId, i64> {
        self.traffic.drain()
    }

    /// Take the request count, resetting it to zero.
    pub fn drain_requests(&self) -> i64 {
        self.requests.drain()
    }

    /// Count the calling task as a live handler until the guard drops.
    ///
    /// Tasks on the node's own runtime are reported without a guard. Work
    /// running elsewhere (another runtime, a plain thread) should hold one
    /// for its whole lifetime.
    pub fn enter_task(&self) -> TaskGuard {
        self.tasks.enter()
    }

    pub fn registry(&self) -> &Arc<AuthorizationRegistry> {
        &self.registry
    }

    pub fn traffic(&self) -> &Arc<TrafficMeter> {
        &self.traffic
    }

    pub fn requests(&self) -> &Arc<RequestCounter> {
        &self.requests
    }

    pub fn tasks(&self) -> &Arc<LiveTasks> {
        &self.tasks
    }
}
