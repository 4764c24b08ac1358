//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the checker.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the subdomain checker.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The hosting platform whose wildcard domain is being checked.
    pub platform: PlatformConfig,

    /// Outbound probe settings.
    pub probe: ProbeConfig,

    /// Classification policy knobs.
    pub policy: PolicyConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Hosting platform description.
///
/// The defaults describe Vercel: every deployment lives under `*.vercel.app`
/// and an unbound name answers `404` with `x-vercel-error: DEPLOYMENT_NOT_FOUND`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Wildcard domain suffix appended to every candidate (no leading dot).
    pub suffix: String,

    /// Platform name matched case-insensitively against the `server` header.
    pub name: String,

    /// Response header carrying the platform's error code.
    pub error_header: String,

    /// Error code proving that no deployment is bound to the hostname.
    pub not_found_code: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            suffix: "vercel.app".to_string(),
            name: "vercel".to_string(),
            error_header: "x-vercel-error".to_string(),
            not_found_code: "DEPLOYMENT_NOT_FOUND".to_string(),
        }
    }
}

/// Outbound probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Hard deadline for a single probe, in milliseconds.
    pub timeout_ms: u64,

    /// URL scheme used to reach the candidate (`https` in production).
    pub scheme: String,

    /// User-Agent sent with every probe.
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 3000,
            scheme: "https".to_string(),
            user_agent: concat!("subdomain-checker/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Classification policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Treat 5xx answers as proof that the name is taken.
    /// When disabled they are reported as inconclusive instead
    /// (still surfaced to the user as "taken").
    pub server_errors_as_taken: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            server_errors_as_taken: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
