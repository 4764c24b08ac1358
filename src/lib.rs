//! Subdomain availability checker.
//!
//! Answers "is `{name}.vercel.app` (or another wildcard platform domain)
//! still free?" by probing the live hostname and reading the platform's
//! answer.

pub mod check;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod probe;

pub use check::{AvailabilityResult, Checker};
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use probe::{ProbeOutcome, Prober, Verdict};
