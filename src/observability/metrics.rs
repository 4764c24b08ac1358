//! Metrics collection and exposition.
//!
//! # Metrics
//! - `subdomain_checks_total` (counter): completed checks by verdict
//! - `subdomain_probe_duration_seconds` (histogram): probe latency
//! - `subdomain_check_failures_total` (counter): checks that fell back to a
//!   generic answer, by stage

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::probe::Verdict;

/// Install the Prometheus exporter. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one completed check.
pub fn record_check(verdict: Verdict, elapsed: Duration) {
    counter!("subdomain_checks_total", "verdict" => verdict.as_str()).increment(1);
    histogram!("subdomain_probe_duration_seconds").record(elapsed.as_secs_f64());
}

/// Record a check that could not produce a verdict.
pub fn record_check_failure(stage: &'static str) {
    counter!("subdomain_check_failures_total", "stage" => stage).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_occupied_address_fails_install() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap();

        assert!(matches!(
            init_metrics(addr),
            Err(BuildError::FailedToCreateHTTPListener(_))
        ));
    }
}
