//! Control-plane synchronization subsystem.
//!
//! # Data Flow
//! ```text
//! Timer tick (every push interval) ─┐
//! Shutdown signal (final push) ─────┴→ worker.rs push_node()
//!     → report.rs   build_report()  drains traffic + request counters
//!     → client.rs   POST <register_url>  (JSON, Authorization header, timeout)
//!     → reply {"<user id>": <int>, ...}
//!     → node registry replace_all(keys)
//! ```
//!
//! # Design Decisions
//! - No registration URL → no sync task at all (standalone mode)
//! - Failures are logged and swallowed; the last good set stays in force
//! - Timer and final push run in the same task, so pushes never overlap

pub mod client;
pub mod error;
pub mod report;
pub mod worker;

pub use client::{decode_users, RegistrationClient};
pub use error::{SyncError, SyncResult};
pub use report::{SnapshotBuilder, StatReport, UNKNOWN_HOST};
pub use worker::{ControlPlaneSync, SyncSummary};
