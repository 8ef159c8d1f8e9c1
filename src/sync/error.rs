//! Control-plane synchronization errors.

use thiserror::Error;

/// Why a single synchronization cycle failed.
///
/// Every variant is transient from the node's point of view: the registry
/// keeps its last known-good set and the next tick tries again.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    /// The report could not be serialized.
    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),

    /// Connection, TLS or protocol failure.
    #[error("Request failed: {0}")]
    Transport(String),

    /// No response within the configured timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The control plane answered with a non-2xx status.
    #[error("Control plane returned status {0}")]
    Status(u16),

    /// The body was not a JSON object of user id → integer.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

pub type SyncResult<T> = Result<T, SyncError>;
