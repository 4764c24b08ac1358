//! Probe execution and outcome classification.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use url::{Host, Url};

use crate::check::CandidateHostname;
use crate::config::{PlatformConfig, PolicyConfig, ServiceConfig};
use crate::probe::rules::{evaluate, RuleContext};
use crate::probe::transport::{Transport, TransportError};
use crate::probe::types::{ProbeOutcome, ProbeResponse};

/// Signal attached to every outcome caused by an unreachable host.
pub const DNS_NOT_FOUND: &str = "DNS not found";

/// Issues a single probe against a hostname and classifies what happened.
#[derive(Clone)]
pub struct Prober {
    transport: Arc<dyn Transport>,
    scheme: String,
    platform: PlatformConfig,
    policy: PolicyConfig,
}

impl Prober {
    pub fn new(transport: Arc<dyn Transport>, config: &ServiceConfig) -> Self {
        Self {
            transport,
            scheme: config.probe.scheme.clone(),
            platform: config.platform.clone(),
            policy: config.policy.clone(),
        }
    }

    /// Probe `hostname` until it answers or `cancel` fires.
    ///
    /// Never fails: every path resolves to a `ProbeOutcome`.
    #[instrument(skip_all, fields(hostname = %hostname))]
    pub async fn classify(
        &self,
        hostname: &CandidateHostname,
        cancel: CancellationToken,
    ) -> ProbeOutcome {
        let url = match probe_url(&self.scheme, hostname.as_str()) {
            Ok(url) => url,
            Err(reason) => {
                debug!(reason = %reason, "Candidate is not a bare host");
                return ProbeOutcome::inconclusive(reason);
            }
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportError::Timeout),
            result = self.transport.head(&url) => result,
        };

        match result {
            Ok(response) => self.classify_response(&response),
            Err(err) => {
                debug!(error = %err, "Probe request failed");
                classify_error(&err)
            }
        }
    }

    /// Run a response through the decision table.
    pub fn classify_response(&self, response: &ProbeResponse) -> ProbeOutcome {
        let (rule, outcome) = evaluate(&RuleContext {
            response,
            platform: &self.platform,
            policy: &self.policy,
        });

        debug!(
            status = response.status,
            rule,
            verdict = %outcome.verdict,
            "Probe response classified"
        );
        outcome
    }
}

/// Root URL of `hostname`, refusing anything that is not exactly one host.
///
/// A candidate carrying URL delimiters (`/ ? # @ :`) would otherwise move
/// the authority and probe some other machine.
fn probe_url(scheme: &str, hostname: &str) -> Result<Url, String> {
    let host = Host::parse(hostname).map_err(|e| format!("invalid host: {e}"))?;
    let expected = host.to_string();
    let url = Url::parse(&format!("{scheme}://{expected}/")).map_err(|e| e.to_string())?;

    let bare = url.host_str() == Some(expected.as_str())
        && url.username().is_empty()
        && url.password().is_none()
        && url.port().is_none()
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none();

    if bare {
        Ok(url)
    } else {
        Err(format!("`{hostname}` does not form a bare host"))
    }
}

/// Map a transport failure onto a verdict.
///
/// An unreachable host is evidence of absence; a timeout or unknown failure
/// is not, so it never produces `DoesNotExist`.
pub fn classify_error(err: &TransportError) -> ProbeOutcome {
    match err {
        TransportError::Resolution(_) | TransportError::Connect(_) => {
            ProbeOutcome::does_not_exist(Some(DNS_NOT_FOUND.to_string()))
        }
        TransportError::Timeout => ProbeOutcome::timeout(),
        TransportError::Other(detail) => ProbeOutcome::inconclusive(detail.clone()),
    }
}
