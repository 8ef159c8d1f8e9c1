//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → NodeConfig (validated, immutable)
//!     → shared via Arc to the node, the HTTP listener and the sync loop
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the node never reloads it
//! - All fields have defaults so the node can start without a file
//!   (standalone mode, no seeded users)
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AuthConfig, BuildConfig, ControlPlaneConfig, ListenerConfig, NodeConfig, ObservabilityConfig,
    SubscriptionConfig,
};
