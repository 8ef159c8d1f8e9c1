//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the node state from validated configuration
//! - Start the control-plane sync loop (unless standalone)
//! - Bind the HTTP listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Configuration is validated here too, not only by the CLI
//! - The sync loop subscribes to shutdown before the listener starts, so it
//!   can never miss the signal
//! - Listener starts last (traffic only when ready)

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::validation::validate_config;
use crate::config::{ConfigError, NodeConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::node::Node;
use crate::sync::{ControlPlaneSync, SyncError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Failed to set up control-plane sync: {0}")]
    Sync(#[from] SyncError),
}

/// A started node: its shared state plus the tasks serving it.
pub struct Running {
    node: Node,
    shutdown: Shutdown,
    local_addr: SocketAddr,
    sync_task: Option<JoinHandle<()>>,
    server_task: JoinHandle<Result<(), std::io::Error>>,
}

impl Running {
    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_standalone(&self) -> bool {
        self.sync_task.is_none()
    }

    /// Wait for every task to finish after shutdown fires.
    ///
    /// The sync loop's final push is awaited first; the listener drains
    /// in-flight requests on its own.
    pub async fn wait(self) -> Result<(), std::io::Error> {
        if let Some(sync_task) = self.sync_task {
            if let Err(e) = sync_task.await {
                tracing::warn!(error = %e, "Control-plane sync task panicked");
            }
        }

        match self.server_task.await {
            Ok(res) => res,
            Err(e) => Err(std::io::Error::other(e)),
        }
    }

    /// Trigger shutdown and wait for the final push and listener drain.
    pub async fn shutdown(self) -> Result<(), std::io::Error> {
        self.shutdown.trigger();
        self.wait().await
    }
}

/// Start the node with no extra routes.
pub async fn start(config: Arc<NodeConfig>, shutdown: Shutdown) -> Result<Running, StartupError> {
    start_with_routes(config, shutdown, Router::new()).await
}

/// Start the node, mounting `routes` (the tunnel endpoints) on its listener.
pub async fn start_with_routes(
    config: Arc<NodeConfig>,
    shutdown: Shutdown,
    routes: Router,
) -> Result<Running, StartupError> {
    validate_config(&config).map_err(ConfigError::Validation)?;

    let node = Node::new(config.auth.users.iter().cloned());

    let sync = ControlPlaneSync::from_config(&config, node.clone())?;

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.listener.bind_address.clone(),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(|source| StartupError::Bind {
        addr: config.listener.bind_address.clone(),
        source,
    })?;

    let sync_task = match sync {
        Some(sync) => Some(tokio::spawn(sync.run(shutdown.subscribe()))),
        None => {
            tracing::info!("Register url is empty, running in standalone mode");
            None
        }
    };

    let server = HttpServer::new(&config, node.clone()).with_routes(routes);
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tracing::info!(
        address = %local_addr,
        users = node.registry().len(),
        standalone = sync_task.is_none(),
        "Node started"
    );

    Ok(Running {
        node,
        shutdown,
        local_addr,
        sync_task,
        server_task,
    })
}
