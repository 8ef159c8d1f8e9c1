//! Registration endpoint client.
//!
//! # Responsibilities
//! - POST a [`StatReport`] as JSON with the configured `Authorization` value
//! - Bound every round trip with a timeout
//! - Decode the reply into the next authorization set
//!
//! # Design Decisions
//! - No retries here; the sync interval is the retry mechanism
//! - Non-2xx is a failure even when the body would decode
//! - Only the reply's keys matter; integer values are validated then dropped

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::config::ControlPlaneConfig;
use crate::node::UserId;
use crate::sync::error::{SyncError, SyncResult};
use crate::sync::report::StatReport;

/// HTTP client bound to one registration endpoint.
#[derive(Debug, Clone)]
pub struct RegistrationClient {
    http: reqwest::Client,
    url: String,
    token: String,
    timeout: Duration,
}

impl RegistrationClient {
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> SyncResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Client(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
            token: token.into(),
            timeout,
        })
    }

    pub fn from_config(config: &ControlPlaneConfig) -> SyncResult<Self> {
        Self::new(
            config.register_url.trim(),
            config.register_token.clone(),
            config.timeout(),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one report and return the authorization set from the reply.
    pub async fn push(&self, report: &StatReport) -> SyncResult<HashSet<UserId>> {
        let body = serde_json::to_vec(report)?;

        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.token.as_str())
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        decode_users(&bytes)
    }

    fn classify(&self, e: reqwest::Error) -> SyncError {
        if e.is_timeout() {
            SyncError::Timeout(self.timeout.as_secs())
        } else {
            SyncError::Transport(e.to_string())
        }
    }
}

/// Parse a `{"<user id>": <integer>, ...}` reply into its key set.
pub fn decode_users(body: &[u8]) -> SyncResult<HashSet<UserId>> {
    let users: HashMap<UserId, i64> =
        serde_json::from_slice(body).map_err(|e| SyncError::Decode(e.to_string()))?;
    Ok(users.into_keys().collect())
}
