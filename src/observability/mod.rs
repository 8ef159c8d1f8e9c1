//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!
//! Consumers:
//!     → stdout, collected by the process supervisor
//! ```
//!
//! # Design Decisions
//! - Structured fields (user_id, url, error) rather than formatted strings
//! - Sync failures and unauthorized users are warnings, never errors that stop the node

pub mod logging;

pub use logging::init_logging;
