//! Availability check orchestration.
//!
//! # Responsibilities
//! - Turn raw user input into a candidate hostname
//! - Own the probe deadline and run the probe under it
//! - Collapse the tri-state verdict into available / taken
//! - Contain probe failures so a well-formed answer always comes back

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::check::hostname::{CandidateHostname, ValidationError};
use crate::check::AvailabilityResult;
use crate::config::ServiceConfig;
use crate::observability::metrics;
use crate::probe::{ProbeOutcome, Prober};

/// Cancels its token once the deadline passes; aborted on drop.
struct Deadline(JoinHandle<()>);

impl Deadline {
    fn start(cancel: CancellationToken, after: Duration) -> Self {
        Self(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            cancel.cancel();
        }))
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Answers "is `{name}.{suffix}` free?".
#[derive(Clone)]
pub struct Checker {
    prober: Arc<Prober>,
    suffix: String,
    timeout: Duration,
}

impl Checker {
    pub fn new(prober: Arc<Prober>, config: &ServiceConfig) -> Self {
        Self {
            prober,
            suffix: config.platform.suffix.trim().to_lowercase(),
            timeout: Duration::from_millis(config.probe.timeout_ms),
        }
    }

    /// Platform suffix appended to every candidate.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Check one raw input. Always returns a result.
    #[instrument(skip_all)]
    pub async fn handle(&self, raw_input: &str) -> AvailabilityResult {
        let candidate = match CandidateHostname::new(raw_input, &self.suffix) {
            Ok(candidate) => candidate,
            Err(ValidationError::Empty) => return AvailabilityResult::prompt(),
        };

        let started = Instant::now();
        match self.probe(&candidate).await {
            Ok(outcome) => {
                let elapsed = started.elapsed();
                info!(
                    hostname = %candidate,
                    verdict = %outcome.verdict,
                    signal = outcome.signal.as_deref().unwrap_or("-"),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Subdomain checked"
                );
                metrics::record_check(outcome.verdict, elapsed);
                AvailabilityResult::from_outcome(&candidate, &outcome)
            }
            Err(e) => {
                error!(hostname = %candidate, error = %e, "Probe did not complete");
                metrics::record_check_failure("probe");
                AvailabilityResult::unable_to_check(&candidate)
            }
        }
    }

    /// Run the probe on its own task under a fresh deadline.
    ///
    /// The task boundary turns a panicking probe into an error value.
    async fn probe(&self, candidate: &CandidateHostname) -> Result<ProbeOutcome, tokio::task::JoinError> {
        let cancel = CancellationToken::new();
        let _deadline = Deadline::start(cancel.clone(), self.timeout);

        let prober = Arc::clone(&self.prober);
        let candidate = candidate.clone();
        tokio::spawn(async move { prober.classify(&candidate, cancel).await }).await
    }
}
