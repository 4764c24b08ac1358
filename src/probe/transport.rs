//! Network boundary for probes.
//!
//! # Responsibilities
//! - Issue one HEAD request per probe, without following redirects
//! - Keep responses uncached
//! - Reduce every failure to the closed `TransportError` set
//!
//! # Design Decisions
//! - reqwest errors are inspected once, here, so the classifier only
//!   pattern-matches on variants
//! - The trait exists so checks can run against scripted responses

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::redirect::Policy;
use thiserror::Error;
use url::Url;

use crate::config::ProbeConfig;
use crate::probe::types::ProbeResponse;

/// Substrings that identify a name-resolution failure in a connect error chain.
const RESOLUTION_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host",
    "temporary failure in name resolution",
    "no address associated with hostname",
];

/// Why a probe request produced no response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request ran past its deadline.
    #[error("request timed out")]
    Timeout,

    /// The hostname did not resolve.
    #[error("name resolution failed: {0}")]
    Resolution(String),

    /// The connection could not be established (refused, reset, TLS).
    #[error("connection failed: {0}")]
    Connect(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return TransportError::Timeout;
        }

        let detail = error_chain(&err);
        if err.is_connect() {
            let lowered = detail.to_lowercase();
            if RESOLUTION_MARKERS.iter().any(|m| lowered.contains(m)) {
                TransportError::Resolution(detail)
            } else {
                TransportError::Connect(detail)
            }
        } else {
            TransportError::Other(detail)
        }
    }
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}

/// Sends the probe request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn head(&self, url: &Url) -> Result<ProbeResponse, TransportError>;
}

/// Production transport backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client with the probe timeout and redirects disabled.
    ///
    /// Environment proxies are ignored: a proxy answers 502 for hosts that
    /// do not resolve, which would hide the absence signal.
    pub fn new(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(Policy::none())
            .no_proxy()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn head(&self, url: &Url) -> Result<ProbeResponse, TransportError> {
        let response = self
            .client
            .head(url.clone())
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        Ok(ProbeResponse {
            status: response.status().as_u16(),
            headers: response.headers().clone(),
        })
    }
}
