#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use honeycomb_sink::constants::{HONEYCOMB_API_KEY_ENV, HONEYCOMB_DATASET_ENV};
use honeycomb_sink::event::CloudEvent;
use honeycomb_sink::relay::{EventRelay, HoneycombClient};
use honeycomb_sink::server::SinkServer;
use std::collections::HashMap;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const DATASET: &str = "pubsub-logs";
pub const API_KEY: &str = "hcaik_test_key";

/// One request as seen by the mock Honeycomb API
#[derive(Clone, Debug)]
pub struct CapturedRequest {
    pub dataset: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    status: StatusCode,
    body: &'static str,
    hang: bool,
}

/// Local stand-in for `https://api.honeycomb.io:443`
pub struct MockHoneycomb {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl MockHoneycomb {
    pub async fn start() -> Self {
        Self::start_with(StatusCode::OK, r#"{"status":"ok"}"#, false).await
    }

    pub async fn responding(status: StatusCode, body: &'static str) -> Self {
        Self::start_with(status, body, false).await
    }

    /// Accepts requests but never answers them
    pub async fn hanging() -> Self {
        Self::start_with(StatusCode::OK, "", true).await
    }

    async fn start_with(status: StatusCode, body: &'static str, hang: bool) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: requests.clone(),
            status,
            body,
            hang,
        };
        let app = Router::new()
            .route("/1/events/{dataset}", post(capture))
            .layer(DefaultBodyLimit::disable())
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(axum::serve(listener, app).into_future());

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub fn api_host(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockHoneycomb {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn capture(
    State(state): State<MockState>,
    Path(dataset): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    state.requests.lock().unwrap().push(CapturedRequest {
        dataset,
        headers,
        body,
    });
    if state.hang {
        std::future::pending::<()>().await;
    }
    (state.status, state.body)
}

/// Honeycomb stand-in that answers every request with headers promising more
/// body than it ever sends
pub struct TruncatingHoneycomb {
    addr: SocketAddr,
    requests: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl TruncatingHoneycomb {
    /// Closes the connection after a partial body
    pub async fn closing() -> Self {
        Self::start_with(false).await
    }

    /// Keeps the connection open after a partial body
    pub async fn stalling() -> Self {
        Self::start_with(true).await
    }

    async fn start_with(stall: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(AtomicUsize::new(0));

        let handle = tokio::spawn({
            let requests = requests.clone();
            async move {
                while let Ok((socket, _)) = listener.accept().await {
                    tokio::spawn(answer_truncated(socket, requests.clone(), stall));
                }
            }
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub fn api_host(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for TruncatingHoneycomb {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn answer_truncated(
    mut socket: TcpStream,
    requests: Arc<AtomicUsize>,
    stall: bool,
) -> std::io::Result<()> {
    let mut received = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        received.extend_from_slice(&chunk[..n]);
        if let Some(pos) = received.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&received[..header_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while received.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        received.extend_from_slice(&chunk[..n]);
    }
    requests.fetch_add(1, Ordering::SeqCst);

    socket
        .write_all(
            b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n{\"status\"",
        )
        .await?;
    socket.flush().await?;

    if stall {
        std::future::pending::<()>().await;
    }
    socket.shutdown().await
}

pub fn config_source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn full_config() -> HashMap<String, String> {
    config_source(&[(HONEYCOMB_DATASET_ENV, DATASET), (HONEYCOMB_API_KEY_ENV, API_KEY)])
}

pub fn relay_for(mock: &MockHoneycomb, config: HashMap<String, String>) -> EventRelay {
    EventRelay::new(config, HoneycombClient::with_api_host(mock.api_host()))
}

/// `messagePublished` event data carrying `payload`
pub fn published_data(payload: &[u8], message_id: &str) -> String {
    serde_json::json!({
        "message": {
            "data": STANDARD.encode(payload),
            "messageId": message_id,
            "attributes": {},
            "publishTime": "2024-02-26T19:13:55.749Z",
            "orderingKey": ""
        },
        "subscription": "projects/demo/subscriptions/honeycomb-sink"
    })
    .to_string()
}

pub fn pubsub_event(payload: &[u8], message_id: &str) -> CloudEvent {
    CloudEvent::new(
        message_id,
        "//pubsub.googleapis.com/projects/demo/topics/logs",
        "google.cloud.pubsub.topic.v1.messagePublished",
    )
    .with_data("application/json", published_data(payload, message_id))
}

/// A sink server wired to `mock`, running until `stop` is called
pub struct TestSink {
    addr: SocketAddr,
    shutdown: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl TestSink {
    pub async fn start(mock: &MockHoneycomb, config: HashMap<String, String>) -> Self {
        let relay = relay_for(mock, config);
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let server = SinkServer::bind(addr, relay).await.unwrap();
        let addr = server.local_addr().unwrap();

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn({
            let shutdown = shutdown.clone();
            async move { server.run(shutdown).await }
        });

        Self {
            addr,
            shutdown,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub async fn stop(self) {
        self.shutdown.cancel();
        let _ = self.handle.await;
    }
}
