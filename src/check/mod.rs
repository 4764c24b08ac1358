//! Request handling: from raw input to an availability answer.
//!
//! # Data Flow
//! ```text
//! raw input
//!     → hostname.rs (trim, lowercase, append suffix)
//!     → handler.rs (deadline + probe task)
//!     → AvailabilityResult { available, message }
//! ```
//!
//! # Design Decisions
//! - Only `DoesNotExist` reports a name as available
//! - `Inconclusive` is reported as taken
//! - Blank input never reaches the network

use serde::{Deserialize, Serialize};

use crate::probe::{ProbeOutcome, Verdict};

pub mod handler;
pub mod hostname;

pub use handler::Checker;
pub use hostname::{CandidateHostname, ValidationError};

/// Shown when the input is empty.
pub const PROMPT_MESSAGE: &str = "Please enter a domain";

/// Shown when the request itself could not be processed.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again";

/// Answer returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub available: bool,
    pub message: String,
}

impl AvailabilityResult {
    /// Collapse a probe outcome. Only `DoesNotExist` is available.
    pub fn from_outcome(candidate: &CandidateHostname, outcome: &ProbeOutcome) -> Self {
        match outcome.verdict {
            Verdict::DoesNotExist => Self {
                available: true,
                message: format!("{candidate} is available!"),
            },
            Verdict::Exists | Verdict::Inconclusive => Self {
                available: false,
                message: format!("{candidate} is already taken"),
            },
        }
    }

    pub fn prompt() -> Self {
        Self {
            available: false,
            message: PROMPT_MESSAGE.to_string(),
        }
    }

    pub fn unable_to_check(candidate: &CandidateHostname) -> Self {
        Self {
            available: false,
            message: format!("Unable to check {candidate}. Please try again"),
        }
    }

    pub fn internal_error() -> Self {
        Self {
            available: false,
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> CandidateHostname {
        CandidateHostname::new("myapp", "vercel.app").unwrap()
    }

    #[test]
    fn test_only_absence_is_available() {
        let free = AvailabilityResult::from_outcome(&candidate(), &ProbeOutcome::does_not_exist(None));
        assert!(free.available);
        assert_eq!(free.message, "myapp.vercel.app is available!");

        for outcome in [ProbeOutcome::exists("200"), ProbeOutcome::timeout()] {
            let taken = AvailabilityResult::from_outcome(&candidate(), &outcome);
            assert!(!taken.available);
            assert_eq!(taken.message, "myapp.vercel.app is already taken");
        }
    }

    #[test]
    fn test_serializes_to_wire_shape() {
        let json = serde_json::to_value(AvailabilityResult::prompt()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "available": false, "message": "Please enter a domain" })
        );
    }
}
