//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

use subdomain_checker::check::Checker;
use subdomain_checker::config::ServiceConfig;
use subdomain_checker::probe::{
    ProbeResponse, Prober, ReqwestTransport, Transport, TransportError,
};

/// Transport that returns the same result on every call and counts calls.
pub struct ScriptedTransport {
    result: Result<ProbeResponse, TransportError>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn respond(response: ProbeResponse) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(response),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn fail(err: TransportError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(err),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn head(&self, _url: &Url) -> Result<ProbeResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Transport that never answers.
pub struct StalledTransport;

#[async_trait]
impl Transport for StalledTransport {
    async fn head(&self, _url: &Url) -> Result<ProbeResponse, TransportError> {
        std::future::pending().await
    }
}

/// Transport that panics mid-probe.
pub struct PanickingTransport;

#[async_trait]
impl Transport for PanickingTransport {
    async fn head(&self, _url: &Url) -> Result<ProbeResponse, TransportError> {
        panic!("transport exploded")
    }
}

/// Real reqwest transport whose requests land on `target`, whatever host the
/// URL names. Records the hosts it was asked for.
pub struct PinnedTransport {
    inner: ReqwestTransport,
    target: SocketAddr,
    hosts: Mutex<Vec<String>>,
}

impl PinnedTransport {
    pub fn new(config: &ServiceConfig, target: SocketAddr) -> Arc<Self> {
        Arc::new(Self {
            inner: ReqwestTransport::new(&config.probe).unwrap(),
            target,
            hosts: Mutex::new(Vec::new()),
        })
    }

    pub fn hosts(&self) -> Vec<String> {
        self.hosts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for PinnedTransport {
    async fn head(&self, url: &Url) -> Result<ProbeResponse, TransportError> {
        self.hosts
            .lock()
            .unwrap()
            .push(url.host_str().unwrap_or_default().to_string());

        let mut pinned = url.clone();
        pinned.set_ip_host(self.target.ip()).unwrap();
        pinned.set_port(Some(self.target.port())).unwrap();
        self.inner.head(&pinned).await
    }
}

/// Defaults with a short probe deadline so timeout tests stay fast.
pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.probe.timeout_ms = 200;
    config
}

pub fn checker_with(transport: Arc<dyn Transport>) -> Checker {
    checker_with_config(transport, &test_config())
}

pub fn checker_with_config(transport: Arc<dyn Transport>, config: &ServiceConfig) -> Checker {
    let prober = Arc::new(Prober::new(transport, config));
    Checker::new(prober, config)
}

/// Raw request heads received by a recording backend, oldest first.
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// Start a backend that answers every request with a fixed raw head.
///
/// `head` is everything after the status line, e.g. `"server: Vercel\r\n"`.
pub async fn start_raw_backend(status_line: &'static str, head: &'static str) -> SocketAddr {
    start_recording_backend(status_line, head).await.0
}

/// Like `start_raw_backend`, also keeping every request head it reads.
pub async fn start_recording_backend(
    status_line: &'static str,
    head: &'static str,
) -> (SocketAddr, RequestLog) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let received = Arc::clone(&log);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let received = Arc::clone(&received);
                    tokio::spawn(async move {
                        let request = read_request_head(&mut socket).await;
                        received.lock().unwrap().push(request);
                        let response_str = format!(
                            "HTTP/1.1 {}\r\n{}Content-Length: 0\r\nConnection: close\r\n\r\n",
                            status_line, head
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}

/// Start a backend that accepts connections and never replies.
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address on which nothing is listening.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
