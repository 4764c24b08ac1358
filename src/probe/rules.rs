//! Response classification policy as an ordered decision table.
//!
//! Rows are evaluated top-to-bottom and the first matching row decides.
//! Absence must be proven: only the platform's own "no deployment" answer
//! yields `DoesNotExist`, every other answer means something is listening.

use std::fmt;

use crate::config::{PlatformConfig, PolicyConfig};
use crate::probe::types::{ProbeOutcome, ProbeResponse, Verdict};

/// Everything a row may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub response: &'a ProbeResponse,
    pub platform: &'a PlatformConfig,
    pub policy: &'a PolicyConfig,
}

impl RuleContext<'_> {
    fn error_code(&self) -> Option<&str> {
        self.response.header(&self.platform.error_header)
    }

    fn served_by_platform(&self) -> bool {
        let name = self.platform.name.to_lowercase();
        self.response
            .header("server")
            .is_some_and(|server| server.to_lowercase().contains(&name))
    }
}

/// One row of the table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&RuleContext<'_>) -> bool,
    pub verdict: Verdict,
    pub signal: fn(&RuleContext<'_>) -> Option<String>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("verdict", &self.verdict)
            .finish()
    }
}

pub static RULES: &[Rule] = &[
    Rule {
        name: "success_range",
        matches: is_success_range,
        verdict: Verdict::Exists,
        signal: status_signal,
    },
    Rule {
        name: "deployment_not_found",
        matches: is_deployment_not_found,
        verdict: Verdict::DoesNotExist,
        signal: error_code_signal,
    },
    Rule {
        name: "platform_not_found",
        matches: is_platform_not_found,
        verdict: Verdict::Exists,
        signal: error_code_or_unknown,
    },
    Rule {
        name: "server_error_lenient",
        matches: is_lenient_server_error,
        verdict: Verdict::Inconclusive,
        signal: status_signal,
    },
    Rule {
        name: "error_status",
        matches: is_error_status,
        verdict: Verdict::Exists,
        signal: status_signal,
    },
    Rule {
        name: "fallthrough",
        matches: always,
        verdict: Verdict::DoesNotExist,
        signal: no_signal,
    },
];

/// Evaluate the table, returning the deciding row's name and its outcome.
pub fn evaluate(cx: &RuleContext<'_>) -> (&'static str, ProbeOutcome) {
    RULES
        .iter()
        .find(|rule| (rule.matches)(cx))
        .map(|rule| (rule.name, ProbeOutcome::new(rule.verdict, (rule.signal)(cx))))
        .unwrap_or(("fallthrough", ProbeOutcome::does_not_exist(None)))
}

fn is_success_range(cx: &RuleContext<'_>) -> bool {
    cx.response.status < 400
}

fn is_deployment_not_found(cx: &RuleContext<'_>) -> bool {
    cx.response.status == 404 && cx.error_code() == Some(cx.platform.not_found_code.as_str())
}

fn is_platform_not_found(cx: &RuleContext<'_>) -> bool {
    cx.response.status == 404 && cx.served_by_platform()
}

fn is_lenient_server_error(cx: &RuleContext<'_>) -> bool {
    cx.response.status >= 500 && !cx.policy.server_errors_as_taken
}

fn is_error_status(cx: &RuleContext<'_>) -> bool {
    cx.response.status >= 400
}

fn always(_: &RuleContext<'_>) -> bool {
    true
}

fn status_signal(cx: &RuleContext<'_>) -> Option<String> {
    Some(cx.response.status.to_string())
}

fn error_code_signal(cx: &RuleContext<'_>) -> Option<String> {
    cx.error_code().map(str::to_string)
}

fn error_code_or_unknown(cx: &RuleContext<'_>) -> Option<String> {
    Some(cx.error_code().unwrap_or("unknown").to_string())
}

fn no_signal(_: &RuleContext<'_>) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(response: ProbeResponse) -> (&'static str, ProbeOutcome) {
        decide_with(response, PolicyConfig::default())
    }

    fn decide_with(response: ProbeResponse, policy: PolicyConfig) -> (&'static str, ProbeOutcome) {
        let platform = PlatformConfig::default();
        evaluate(&RuleContext {
            response: &response,
            platform: &platform,
            policy: &policy,
        })
    }

    #[test]
    fn test_success_and_redirect_statuses_exist() {
        for status in [200, 204, 301, 302, 308] {
            let (rule, outcome) = decide(ProbeResponse::new(status));
            assert_eq!(rule, "success_range");
            assert_eq!(outcome, ProbeOutcome::exists(status.to_string()));
        }
    }

    #[test]
    fn test_deployment_not_found_is_the_only_absence_proof() {
        let (rule, outcome) = decide(
            ProbeResponse::new(404)
                .with_header("x-vercel-error", "DEPLOYMENT_NOT_FOUND")
                .with_header("server", "Vercel"),
        );
        assert_eq!(rule, "deployment_not_found");
        assert_eq!(
            outcome,
            ProbeOutcome::does_not_exist(Some("DEPLOYMENT_NOT_FOUND".into()))
        );
    }

    #[test]
    fn test_not_found_code_must_match_exactly() {
        let (rule, outcome) = decide(
            ProbeResponse::new(404).with_header("x-vercel-error", "deployment_not_found"),
        );
        assert_eq!(rule, "error_status");
        assert_eq!(outcome.verdict, Verdict::Exists);
    }

    #[test]
    fn test_platform_404_with_other_code_exists() {
        let (rule, outcome) = decide(
            ProbeResponse::new(404)
                .with_header("x-vercel-error", "NOT_FOUND")
                .with_header("server", "Vercel"),
        );
        assert_eq!(rule, "platform_not_found");
        assert_eq!(outcome, ProbeOutcome::exists("NOT_FOUND"));
    }

    #[test]
    fn test_platform_404_without_code_reports_unknown() {
        let (rule, outcome) = decide(ProbeResponse::new(404).with_header("server", "VERCEL-edge"));
        assert_eq!(rule, "platform_not_found");
        assert_eq!(outcome, ProbeOutcome::exists("unknown"));
    }

    #[test]
    fn test_foreign_404_falls_through_to_error_status() {
        let (rule, outcome) = decide(ProbeResponse::new(404).with_header("server", "nginx"));
        assert_eq!(rule, "error_status");
        assert_eq!(outcome, ProbeOutcome::exists("404"));
    }

    #[test]
    fn test_other_error_statuses_exist() {
        for status in [400, 401, 403, 405, 429, 451, 500, 502, 503] {
            let (rule, outcome) = decide(ProbeResponse::new(status));
            assert_eq!(rule, "error_status", "status {status}");
            assert_eq!(outcome.verdict, Verdict::Exists);
        }
    }

    #[test]
    fn test_lenient_policy_makes_server_errors_inconclusive() {
        let lenient = PolicyConfig {
            server_errors_as_taken: false,
        };

        let (rule, outcome) = decide_with(ProbeResponse::new(503), lenient.clone());
        assert_eq!(rule, "server_error_lenient");
        assert_eq!(outcome, ProbeOutcome::inconclusive("503"));

        let (rule, _) = decide_with(ProbeResponse::new(403), lenient);
        assert_eq!(rule, "error_status");
    }

    #[test]
    fn test_custom_platform_header() {
        let platform = PlatformConfig {
            suffix: "example.dev".into(),
            name: "edge".into(),
            error_header: "x-edge-error".into(),
            not_found_code: "NO_SITE".into(),
        };
        let policy = PolicyConfig::default();
        let response = ProbeResponse::new(404).with_header("X-Edge-Error", "NO_SITE");

        let (rule, outcome) = evaluate(&RuleContext {
            response: &response,
            platform: &platform,
            policy: &policy,
        });
        assert_eq!(rule, "deployment_not_found");
        assert_eq!(outcome.verdict, Verdict::DoesNotExist);
    }

    #[test]
    fn test_table_ends_with_catch_all() {
        let last = RULES.last().unwrap();
        assert_eq!(last.name, "fallthrough");
        assert_eq!(last.verdict, Verdict::DoesNotExist);
    }
}
