//! Domain availability probe.
//!
//! # Data Flow
//! ```text
//! candidate hostname + cancellation token
//!     → classifier.rs (build https URL, race request against token)
//!     → transport.rs (HEAD, no redirects, no cache)
//!         ├─ response → rules.rs (ordered decision table)
//!         └─ error    → TransportError → classify_error
//!     → ProbeOutcome { verdict, signal }
//! ```
//!
//! # Design Decisions
//! - The probe never fails; uncertainty is a verdict (`Inconclusive`)
//! - Deadline is owned by the caller and delivered as a cancellation token
//! - Policy lives in a table of rows, not in nested branches
//! - No retries: one probe per check

pub mod classifier;
pub mod rules;
pub mod transport;
pub mod types;

pub use classifier::{classify_error, Prober, DNS_NOT_FOUND};
pub use transport::{ReqwestTransport, Transport, TransportError};
pub use types::{ProbeOutcome, ProbeResponse, Verdict};
