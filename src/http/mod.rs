//! HTTP listener subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, graceful shutdown)
//!     → middleware/accounting.rs (request counter + live-task guard)
//!     → ping route, or routes mounted by the tunnel handler
//! ```

pub mod middleware;
pub mod server;

pub use server::HttpServer;
