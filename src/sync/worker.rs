//! Periodic control-plane synchronization.

use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::NodeConfig;
use crate::lifecycle::ShutdownListener;
use crate::node::Node;
use crate::sync::client::RegistrationClient;
use crate::sync::error::SyncResult;
use crate::sync::report::SnapshotBuilder;

/// Result of one successful push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    /// Authorized users before the swap.
    pub previous: usize,
    /// Authorized users after the swap.
    pub current: usize,
    /// KB reported in this cycle, summed over users.
    pub reported_kb: i64,
    pub reported_requests: i64,
}

/// Pushes node reports and installs the returned authorization set.
///
/// Only exists when a registration URL is configured; a node without one
/// runs standalone and never builds this type.
#[derive(Debug)]
pub struct ControlPlaneSync {
    node: Node,
    client: RegistrationClient,
    snapshots: SnapshotBuilder,
    interval: Duration,
}

impl ControlPlaneSync {
    pub fn new(
        node: Node,
        client: RegistrationClient,
        snapshots: SnapshotBuilder,
        interval: Duration,
    ) -> Self {
        Self {
            node,
            client,
            snapshots,
            interval,
        }
    }

    /// `Ok(None)` means standalone mode.
    pub fn from_config(config: &NodeConfig, node: Node) -> SyncResult<Option<Self>> {
        if config.is_standalone() {
            return Ok(None);
        }

        let client = RegistrationClient::from_config(&config.control_plane)?;
        let snapshots = SnapshotBuilder::from_config(config, node.clone());

        Ok(Some(Self::new(
            node,
            client,
            snapshots,
            config.control_plane.push_interval(),
        )))
    }

    /// Run one synchronization cycle.
    ///
    /// On failure the registry is left untouched and the error is logged and
    /// returned. Performs a network round trip; never call this from a
    /// connection handler.
    pub async fn push_node(&self) -> SyncResult<SyncSummary> {
        let report = self.snapshots.build_report();
        let reported_kb: i64 = report.traffic.values().sum();
        let reported_requests = report.req_count;

        let users = match self.client.push(&report).await {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!(
                    url = %self.client.url(),
                    error = %e,
                    "Node push failed, keeping current authorization set"
                );
                return Err(e);
            }
        };

        let current = users.len();
        let previous = self.node.registry().replace_all(users);

        tracing::info!(
            previous = previous,
            current = current,
            traffic_users = report.traffic.len(),
            reported_kb = reported_kb,
            req_count = reported_requests,
            "Node pushed, authorization set replaced"
        );

        Ok(SyncSummary {
            previous,
            current,
            reported_kb,
            reported_requests,
        })
    }

    /// Push every interval until shutdown, then push once more and return.
    pub async fn run(self, mut shutdown: ShutdownListener) {
        tracing::info!(
            url = %self.client.url(),
            interval_secs = self.interval.as_secs(),
            "Control-plane sync starting"
        );

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let _ = self.push_node().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown received, sending final push");
                    let _ = self.push_node().await;
                    break;
                }
            }
        }

        tracing::info!("Control-plane sync stopped");
    }
}
