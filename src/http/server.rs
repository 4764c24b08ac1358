//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, panic capture, timeout)
//! - Decode the check request and map outcomes to status codes
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use axum::http::StatusCode;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::check::Checker;
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::http::request::{make_request_span, CheckRequest, SubdomainField, UuidRequestId};
use crate::http::response;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::probe::{Prober, ReqwestTransport};

/// Headroom on top of the probe deadline before the whole request is abandoned.
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(2);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<Checker>,
}

/// HTTP server for the checker.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a server around an existing checker.
    pub fn new(config: ServiceConfig, checker: Arc<Checker>) -> Self {
        let router = Self::build_router(&config, AppState { checker });
        Self { router, config }
    }

    /// Assemble the production stack: reqwest transport → prober → checker.
    pub fn from_config(config: ServiceConfig) -> Result<Self, ServiceError> {
        let transport = Arc::new(ReqwestTransport::new(&config.probe)?);
        let prober = Arc::new(Prober::new(transport, &config));
        let checker = Arc::new(Checker::new(prober, &config));
        Ok(Self::new(config, checker))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let request_timeout = Duration::from_millis(config.probe.timeout_ms) + REQUEST_TIMEOUT_MARGIN;

        Router::new()
            .route("/api/check-domain", post(check_domain))
            .route("/health", get(health))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(CatchPanicLayer::custom(response::handle_panic))
                    .layer(TimeoutLayer::new(request_timeout)),
            )
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            suffix = %self.config.platform.suffix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// `POST /api/check-domain`
async fn check_domain(State(state): State<AppState>, body: Bytes) -> Response {
    let request: CheckRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(error = %e, "Error checking domain: unreadable request body");
            metrics::record_check_failure("request");
            return response::internal_error();
        }
    };

    let subdomain = match request.subdomain() {
        SubdomainField::Given(subdomain) => subdomain,
        SubdomainField::Missing => return response::missing_input(),
        SubdomainField::Unsupported => {
            tracing::error!(
                value = %request.subdomain,
                "Error checking domain: subdomain is not a string"
            );
            metrics::record_check_failure("request");
            return response::internal_error();
        }
    };

    let result = state.checker.handle(subdomain).await;
    response::availability(StatusCode::OK, result)
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

/// `GET /health`
async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
