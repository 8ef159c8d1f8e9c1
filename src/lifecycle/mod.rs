//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Node state → Sync loop → HTTP listener
//!
//! Shutdown (shutdown.rs):
//!     Trigger → every listener observes it independently
//!         → sync loop: final push, exit
//!         → HTTP listener: stop accepting, drain, exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//! ```
//!
//! # Design Decisions
//! - Broadcast shutdown, never a single-delivery signal relayed between tasks
//! - The final push is best effort and bounded by the client timeout

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownListener};
pub use startup::{start, start_with_routes, Running, StartupError};
