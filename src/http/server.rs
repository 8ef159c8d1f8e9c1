//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router (ping route plus routes mounted by the tunnel handler)
//! - Wire up middleware (tracing, timeout, request accounting)
//! - Serve on a bound listener until the shutdown signal fires

use axum::{middleware, routing::get, Router};
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::NodeConfig;
use crate::http::middleware::accounting_middleware;
use crate::lifecycle::ShutdownListener;
use crate::node::Node;

/// HTTP listener for the node.
pub struct HttpServer {
    node: Node,
    routes: Router,
    request_timeout: Duration,
}

impl HttpServer {
    pub fn new(config: &NodeConfig, node: Node) -> Self {
        Self {
            node,
            routes: Router::new().route("/", get(ping)),
            request_timeout: Duration::from_secs(config.listener.request_timeout_secs),
        }
    }

    /// Mount extra routes (e.g. tunnel endpoints) under the same middleware.
    pub fn with_routes(mut self, routes: Router) -> Self {
        self.routes = self.routes.merge(routes);
        self
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn into_router(self) -> Router {
        self.routes
            .layer(middleware::from_fn_with_state(
                self.node,
                accounting_middleware,
            ))
            .layer(TimeoutLayer::new(self.request_timeout))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.into_router();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn ping() -> &'static str {
    "pong"
}
