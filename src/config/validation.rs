//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeout > 0, addresses parse)
//! - Reject suffixes and header names the probe cannot use
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use reqwest::header::HeaderName;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("platform.suffix must not be empty")]
    EmptySuffix,

    #[error("platform.suffix `{0}` must not start or end with a dot or contain whitespace")]
    MalformedSuffix(String),

    #[error("platform.name must not be empty")]
    EmptyPlatformName,

    #[error("platform.error_header `{0}` is not a valid header name")]
    ErrorHeader(String),

    #[error("platform.not_found_code must not be empty")]
    EmptyNotFoundCode,

    #[error("probe.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("probe.scheme `{0}` must be http or https")]
    Scheme(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let suffix = &config.platform.suffix;
    if suffix.is_empty() {
        errors.push(ValidationError::EmptySuffix);
    } else if suffix.starts_with('.')
        || suffix.ends_with('.')
        || suffix.chars().any(char::is_whitespace)
    {
        errors.push(ValidationError::MalformedSuffix(suffix.clone()));
    }

    if config.platform.name.trim().is_empty() {
        errors.push(ValidationError::EmptyPlatformName);
    }

    if HeaderName::from_bytes(config.platform.error_header.as_bytes()).is_err() {
        errors.push(ValidationError::ErrorHeader(config.platform.error_header.clone()));
    }

    if config.platform.not_found_code.is_empty() {
        errors.push(ValidationError::EmptyNotFoundCode);
    }

    if config.probe.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if !matches!(config.probe.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::Scheme(config.probe.scheme.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
