//! Usage accounting subsystem.
//!
//! # Data Flow
//! ```text
//! Connection handlers (many tasks):
//!     → traffic.rs  record(user, bytes)   per transfer
//!     → requests.rs record()              per accepted request
//!     → tasks.rs    enter() / drop guard  per live handler
//!
//! Sync loop (one task, once per cycle):
//!     → traffic.rs  drain()
//!     → requests.rs drain()
//!     → tasks.rs    count()
//! ```
//!
//! # Design Decisions
//! - Nothing here can fail; all operations are in-memory
//! - Drains are read-and-reset, so they must run once per cycle
//! - Traffic is best-effort: an increment racing a drain may land in either report

pub mod requests;
pub mod tasks;
pub mod traffic;

pub use requests::RequestCounter;
pub use tasks::{LiveTasks, TaskGuard};
pub use traffic::{bytes_to_kb, TrafficMeter};
