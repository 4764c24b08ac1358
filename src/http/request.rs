//! Inbound request types and per-request identity.
//!
//! # Responsibilities
//! - Define the JSON body accepted by the check endpoint
//! - Generate a request ID (UUID v4) when the caller sent none
//! - Open the tracing span every request is logged under

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use serde::Deserialize;
use serde_json::Value;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID in both directions.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Body of `POST /api/check-domain`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckRequest {
    /// Kept untyped so falsy values can be told apart from wrong types.
    #[serde(default)]
    pub subdomain: Value,
}

/// What the caller put in `subdomain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdomainField<'a> {
    /// Absent or falsy: `null`, `false`, `0`, `""`.
    Missing,
    Given(&'a str),
    /// A non-empty value that is not a string.
    Unsupported,
}

impl CheckRequest {
    pub fn subdomain(&self) -> SubdomainField<'_> {
        match &self.subdomain {
            Value::Null | Value::Bool(false) => SubdomainField::Missing,
            Value::Number(n) if n.as_f64() == Some(0.0) => SubdomainField::Missing,
            Value::String(s) if s.is_empty() => SubdomainField::Missing,
            Value::String(s) => SubdomainField::Given(s),
            _ => SubdomainField::Unsupported,
        }
    }
}

/// Request ID generator backed by random UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Span for one HTTP exchange, tagged with its request ID.
pub fn make_request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
