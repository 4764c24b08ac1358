//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, span, JSON body)
//!     → check::Checker (probe + verdict)
//!     → response.rs (status code + JSON body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{CheckRequest, UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
