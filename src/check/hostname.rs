//! Candidate hostname construction.

use std::fmt;

use thiserror::Error;

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no subdomain given")]
    Empty,
}

/// `{label}.{suffix}`, lowercase and trimmed, with a non-empty label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateHostname(String);

impl CandidateHostname {
    /// Normalize `raw` (trim, lowercase) and append the platform suffix.
    ///
    /// No character checks happen here: the prober refuses anything that is
    /// not a bare host and reports it as inconclusive.
    pub fn new(raw: &str, suffix: &str) -> Result<Self, ValidationError> {
        let label = raw.trim();
        if label.is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(Self(format!("{}.{}", label.to_lowercase(), suffix)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateHostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CandidateHostname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
