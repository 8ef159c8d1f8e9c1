//! Proxy node agent library.
//!
//! Keeps the set of users allowed through this node, meters their traffic,
//! and reconciles both with a control plane on a fixed interval.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod node;
pub mod observability;
pub mod stats;
pub mod sync;

pub use config::NodeConfig;
pub use http::HttpServer;
pub use lifecycle::{Running, Shutdown};
pub use node::{AuthorizationRegistry, Node, UserId};
pub use sync::{ControlPlaneSync, StatReport, SyncError};
