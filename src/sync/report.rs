//! Point-in-time node reports.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::NodeConfig;
use crate::node::{Node, UserId};

/// Host name reported when the OS lookup fails.
pub const UNKNOWN_HOST: &str = "unknown";

/// Report posted to the control plane once per cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatReport {
    /// KB per user since the previous report.
    pub traffic: HashMap<UserId, i64>,
    pub hostname: String,
    pub sub_addresses: Vec<String>,
    pub req_count: i64,
    /// Live tasks at build time: every task alive on the runtime, or the
    /// node's handler gauge if that is higher.
    #[serde(rename = "goroutine")]
    pub live_tasks: i64,
    pub version_info: String,
}

fn live_task_count(node: &Node) -> i64 {
    let guarded = node.tasks().count();
    let alive = tokio::runtime::Handle::try_current()
        .map(|handle| handle.metrics().num_alive_tasks())
        .unwrap_or(0);
    alive.max(guarded) as i64
}

type HostResolver = fn() -> std::io::Result<String>;

fn system_hostname() -> std::io::Result<String> {
    hostname::get().map(|h| h.to_string_lossy().into_owned())
}

/// Builds [`StatReport`]s, draining the node's counters as it goes.
///
/// Building is destructive: traffic and request counts read as empty right
/// after. Build at most once per synchronization cycle.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    node: Node,
    sub_addresses: Vec<String>,
    version_info: String,
    resolve_host: HostResolver,
}

impl SnapshotBuilder {
    pub fn new(node: Node, sub_addresses: Vec<String>, version_info: String) -> Self {
        Self {
            node,
            sub_addresses,
            version_info,
            resolve_host: system_hostname,
        }
    }

    pub fn from_config(config: &NodeConfig, node: Node) -> Self {
        Self::new(
            node,
            config.subscription.addresses.clone(),
            config.build.version_info(),
        )
    }

    /// Replace the host name lookup.
    pub fn with_host_resolver(mut self, resolve: HostResolver) -> Self {
        self.resolve_host = resolve;
        self
    }

    pub fn build_report(&self) -> StatReport {
        let traffic = self.node.drain_traffic();
        let req_count = self.node.drain_requests();

        let hostname = match (self.resolve_host)() {
            Ok(name) => name,
            Err(e) => {
                tracing::error!(error = %e, "Failed to resolve hostname");
                UNKNOWN_HOST.to_string()
            }
        };

        StatReport {
            traffic,
            hostname,
            sub_addresses: self.sub_addresses.clone(),
            req_count,
            live_tasks: live_task_count(&self.node),
            version_info: self.version_info.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(node: &Node) -> SnapshotBuilder {
        SnapshotBuilder::new(
            node.clone(),
            vec!["a.example.com:443".into()],
            "abc -> now".into(),
        )
        .with_host_resolver(|| Ok("node-1".to_string()))
    }

    #[test]
    fn test_report_drains_counters() {
        let node = Node::new(["u1"]);
        node.record_traffic("u1", 3000);
        node.record_request();
        node.record_request();
        let _live = node.enter_task();

        let report = builder(&node).build_report();
        assert_eq!(report.traffic.get("u1"), Some(&3));
        assert_eq!(report.req_count, 2);
        assert_eq!(report.live_tasks, 1);
        assert_eq!(report.hostname, "node-1");
        assert_eq!(report.version_info, "abc -> now");
        assert_eq!(report.sub_addresses, vec!["a.example.com:443"]);

        // Counters read empty straight after
        assert_eq!(node.traffic().user_count(), 0);
        assert_eq!(node.requests().get(), 0);

        let again = builder(&node).build_report();
        assert!(again.traffic.is_empty());
        assert_eq!(again.req_count, 0);
    }

    #[tokio::test]
    async fn test_live_tasks_include_detached_runtime_tasks() {
        let node = Node::new(Vec::<String>::new());
        let (tx, _) = tokio::sync::broadcast::channel::<()>(1);

        // Tasks that outlive the request that spawned them, like upgraded tunnels
        let mut handles = Vec::new();
        for _ in 0..5 {
            let mut rx = tx.subscribe();
            handles.push(tokio::spawn(async move {
                let _ = rx.recv().await;
            }));
        }
        tokio::task::yield_now().await;

        let report = builder(&node).build_report();
        assert!(report.live_tasks >= 5, "got {}", report.live_tasks);
        assert_eq!(node.tasks().count(), 0);

        drop(tx);
        for h in handles {
            h.await.unwrap();
        }
    }

    #[test]
    fn test_hostname_failure_uses_sentinel() {
        let node = Node::new(Vec::<String>::new());
        node.record_request();

        let report = builder(&node)
            .with_host_resolver(|| Err(std::io::Error::other("no hostname")))
            .build_report();

        assert_eq!(report.hostname, UNKNOWN_HOST);
        assert_eq!(report.req_count, 1);
    }

    #[test]
    fn test_wire_field_names() {
        let node = Node::new(Vec::<String>::new());
        node.record_traffic("u1", 0);
        let report = builder(&node).build_report();

        let value = serde_json::to_value(&report).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["goroutine", "hostname", "req_count", "sub_addresses", "traffic", "version_info"]
        );
        assert_eq!(value["traffic"]["u1"], 1);
    }

    #[test]
    fn test_from_config() {
        let mut config = NodeConfig::default();
        config.subscription.addresses = vec!["x:1".into()];
        config.build.git_hash = "h".into();
        config.build.build_time = "t".into();

        let report = SnapshotBuilder::from_config(&config, Node::new(Vec::<String>::new()))
            .with_host_resolver(|| Ok("n".into()))
            .build_report();
        assert_eq!(report.version_info, "h -> t");
        assert_eq!(report.sub_addresses, vec!["x:1"]);
    }
}
