//! Response construction for the check endpoint.
//!
//! # Design Decisions
//! - Every answer, including failures, carries the `{available, message}` shape
//! - Internal error detail is logged, never returned

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::check::AvailabilityResult;
use crate::observability::metrics;

/// Serialize `result` with the given status.
pub fn availability(status: StatusCode, result: AvailabilityResult) -> Response {
    (status, Json(result)).into_response()
}

/// 400 for a request without a subdomain.
pub fn missing_input() -> Response {
    availability(StatusCode::BAD_REQUEST, AvailabilityResult::prompt())
}

/// 500 with the generic retry message.
pub fn internal_error() -> Response {
    availability(
        StatusCode::INTERNAL_SERVER_ERROR,
        AvailabilityResult::internal_error(),
    )
}

/// Converts a panic in the request path into a 500 response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    tracing::error!(panic = %detail, "Error checking domain: handler panicked");
    metrics::record_check_failure("handler");
    internal_error()
}
