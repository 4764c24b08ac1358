//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! checker / probe / http layers produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - One structured event per completed check
//! - Request ID attached to every HTTP span
//! - Metrics calls are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
