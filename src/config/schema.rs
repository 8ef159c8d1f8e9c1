//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the node agent.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the node agent.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NodeConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Locally seeded authorization set.
    pub auth: AuthConfig,

    /// Control-plane registration settings.
    pub control_plane: ControlPlaneConfig,

    /// Subscription addresses advertised to the control plane.
    pub subscription: SubscriptionConfig,

    /// Build metadata reported with every snapshot.
    pub build: BuildConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl NodeConfig {
    /// True when no registration endpoint is configured.
    pub fn is_standalone(&self) -> bool {
        self.control_plane.register_url.trim().is_empty()
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Seed users authorized before the first synchronization.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// User identifiers (usually UUIDs).
    pub users: Vec<String>,
}

/// Control-plane configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlPlaneConfig {
    /// Registration endpoint. Empty runs the node in standalone mode.
    pub register_url: String,

    /// Value sent verbatim in the `Authorization` header.
    pub register_token: String,

    /// Push interval in seconds.
    pub push_interval_secs: u64,

    /// Timeout for a single registration round trip in seconds.
    pub timeout_secs: u64,
}

impl ControlPlaneConfig {
    pub fn push_interval(&self) -> Duration {
        Duration::from_secs(self.push_interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ControlPlaneConfig {
    fn default() -> Self {
        Self {
            register_url: String::new(),
            register_token: String::new(),
            push_interval_secs: 60,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SubscriptionConfig {
    pub addresses: Vec<String>,
}

/// Build metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    pub git_hash: String,
    pub build_time: String,
}

impl BuildConfig {
    /// Version string in the `<git_hash> -> <build_time>` form.
    pub fn version_info(&self) -> String {
        format!("{} -> {}", self.git_hash, self.build_time)
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            git_hash: option_env!("GIT_HASH")
                .unwrap_or(env!("CARGO_PKG_VERSION"))
                .to_string(),
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown").to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
