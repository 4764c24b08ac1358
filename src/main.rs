//! Subdomain availability checker service.
//!
//! # Architecture Overview
//!
//! ```text
//!   POST /api/check-domain {"subdomain": "myapp"}
//!        │
//!        ▼
//!   ┌─────────┐    ┌──────────────┐    ┌──────────────┐    HEAD https://myapp.vercel.app
//!   │  http   │───▶│    check     │───▶│    probe     │──────────────────────────────▶
//!   │ server  │    │  (deadline,  │    │ (transport + │◀──────────────────────────────
//!   └─────────┘    │   verdict)   │    │  rule table) │    status / headers / error
//!        ▲         └──────┬───────┘    └──────────────┘
//!        └────────────────┘
//!   {"available": true, "message": "myapp.vercel.app is available!"}
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use subdomain_checker::config::{load_or_default, validate_config, ConfigError};
use subdomain_checker::error::{Result, ServiceError};
use subdomain_checker::lifecycle::{wait_for_signal, Shutdown};
use subdomain_checker::observability::{logging, metrics};
use subdomain_checker::HttpServer;

#[derive(Parser)]
#[command(name = "subdomain-checker")]
#[command(about = "HTTP service that reports whether a platform subdomain is free", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        suffix = %config.platform.suffix,
        probe_timeout_ms = config.probe.timeout_ms,
        "subdomain-checker starting"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| ServiceError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::from_config(config)?;
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
