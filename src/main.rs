//! Proxy node agent.
//!
//! ```text
//!   tunnel handlers ──is_authorized / record_traffic / record_request──┐
//!                                                                     ▼
//!   ┌──────────────┐   ┌───────────────────────┐   ┌──────────────────────────┐
//!   │ HTTP listener│──▶│ node state            │◀──│ control-plane sync loop  │
//!   │ (axum)       │   │ registry + counters   │   │ push report, swap users  │
//!   └──────────────┘   └───────────────────────┘   └────────────┬─────────────┘
//!                                                               │ POST JSON
//!                                                               ▼
//!                                                        control plane
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use node_agent::config::{load_config, validation::validate_config, ConfigError, NodeConfig};
use node_agent::lifecycle::{self, signals, Shutdown};
use node_agent::observability::init_logging;

#[derive(Parser)]
#[command(name = "node-agent")]
#[command(about = "Proxy node agent: user authorization and traffic reporting", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Control-plane registration URL (empty for standalone mode)
    #[arg(long)]
    register_url: Option<String>,

    /// Value sent in the Authorization header to the control plane
    #[arg(long)]
    register_token: Option<String>,
}

impl Cli {
    fn load(&self) -> Result<NodeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => NodeConfig::default(),
        };

        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if let Some(url) = &self.register_url {
            config.control_plane.register_url = url.clone();
        }
        if let Some(token) = &self.register_token {
            config.control_plane.register_token = token.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.load()?;

    init_logging(&config.observability.log_level);

    tracing::info!(
        version = %config.build.version_info(),
        bind_address = %config.listener.bind_address,
        users = config.auth.users.len(),
        push_interval_secs = config.control_plane.push_interval_secs,
        "node-agent starting"
    );

    let shutdown = Shutdown::new();
    let running = lifecycle::start(Arc::new(config), shutdown.clone()).await?;

    signals::forward_to(shutdown).await;

    running.wait().await?;
    tracing::info!("Shutdown complete");
    Ok(())
}
