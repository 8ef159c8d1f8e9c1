//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, bind address parses)
//! - Check the registration URL when one is configured
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: NodeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::NodeConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("invalid register_url '{url}': {reason}")]
    RegisterUrl { url: String, reason: String },

    #[error("user id at index {0} is blank")]
    BlankUser(usize),
}

pub fn validate_config(config: &NodeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("listener.request_timeout_secs"));
    }

    if !config.is_standalone() {
        let raw = config.control_plane.register_url.trim();
        match url::Url::parse(raw) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::RegisterUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::RegisterUrl {
                url: raw.to_string(),
                reason: e.to_string(),
            }),
        }

        if config.control_plane.push_interval_secs == 0 {
            errors.push(ValidationError::ZeroDuration("control_plane.push_interval_secs"));
        }
        if config.control_plane.timeout_secs == 0 {
            errors.push(ValidationError::ZeroDuration("control_plane.timeout_secs"));
        }
    }

    for (i, user) in config.auth.users.iter().enumerate() {
        if user.trim().is_empty() {
            errors.push(ValidationError::BlankUser(i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
