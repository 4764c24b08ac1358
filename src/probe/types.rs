//! Probe verdicts and the transport-neutral response view.

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

/// Tri-state judgment produced by one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Something answers on the hostname.
    Exists,
    /// The platform proved that nothing is bound to the hostname.
    DoesNotExist,
    /// The probe could not decide (timeout, unexpected failure).
    Inconclusive,
}

impl Verdict {
    /// Stable label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Exists => "exists",
            Verdict::DoesNotExist => "does_not_exist",
            Verdict::Inconclusive => "inconclusive",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one probe attempt.
///
/// `signal` records what drove the classification (status code, header
/// value or error category). It is diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    pub verdict: Verdict,
    pub signal: Option<String>,
}

impl ProbeOutcome {
    pub fn new(verdict: Verdict, signal: Option<String>) -> Self {
        Self { verdict, signal }
    }

    pub fn exists(signal: impl Into<String>) -> Self {
        Self::new(Verdict::Exists, Some(signal.into()))
    }

    pub fn does_not_exist(signal: Option<String>) -> Self {
        Self::new(Verdict::DoesNotExist, signal)
    }

    pub fn inconclusive(signal: impl Into<String>) -> Self {
        Self::new(Verdict::Inconclusive, Some(signal.into()))
    }

    /// The outcome of a probe that ran out of time.
    pub fn timeout() -> Self {
        Self::inconclusive("timeout")
    }
}

/// Status and headers of a probe response; the body is never read.
#[derive(Debug, Clone, Default)]
pub struct ProbeResponse {
    pub status: u16,
    pub headers: HeaderMap,
}

impl ProbeResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
        }
    }

    /// Builder-style header insertion. Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Header value as text, if present and printable.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
