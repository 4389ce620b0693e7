#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use arcadeserver::config::GatewayConfig;
use arcadeserver::gateway::{GatewayClient, RetryPolicy};
use arcadeserver::routes;
use arcadeserver::state::AppState;
use axum::body::Body;
use axum::extract::{Request, State};
use http::{Method, StatusCode};

pub const TEST_TOKEN: &str = "sekret";

/// One scripted stub answer: the HTTP status and the JSON body to play
/// back. The script is consumed oldest-first; the last entry repeats once
/// the script is exhausted.
#[derive(Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl StubResponse {
    pub fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body }
    }

    pub fn server_error() -> Self {
        Self {
            status: 500,
            body: serde_json::json!({}),
        }
    }
}

/// What the stub saw for one inbound request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

struct StubState {
    requests: Mutex<Vec<RecordedRequest>>,
    script: Mutex<Vec<StubResponse>>,
}

/// In-process stand-in for the streaming gateway. Records every request
/// it receives and answers from the script, regardless of path.
pub struct StubGateway {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubGateway {
    pub async fn spawn(script: Vec<StubResponse>) -> Self {
        let state = Arc::new(StubState {
            requests: Mutex::new(Vec::new()),
            script: Mutex::new(script),
        });

        let app = axum::Router::new()
            .fallback(record)
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", addr.port()),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

async fn record(
    State(state): State<Arc<StubState>>,
    req: Request,
) -> (StatusCode, axum::Json<serde_json::Value>) {
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null),
    });

    let mut script = state.script.lock().unwrap();
    let next = if script.len() > 1 {
        script.remove(0)
    } else {
        script
            .first()
            .cloned()
            .unwrap_or_else(|| StubResponse::ok(serde_json::json!({})))
    };

    (
        StatusCode::from_u16(next.status).unwrap(),
        axum::Json(next.body),
    )
}

/// Millisecond-scale backoff so retry tests stay fast.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        base_delay: Duration::from_millis(10),
    }
}

pub fn gateway_client(base_url: &str, token: &str) -> GatewayClient {
    let config = GatewayConfig {
        base_url: base_url.to_string(),
        token: token.to_string(),
    };
    GatewayClient::new(&config)
        .expect("failed to build gateway client")
        .with_retry(fast_retry())
}

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Fresh empty directory for static-file tests, unique per call.
pub fn temp_static_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "arcade-static-{}-{}",
        std::process::id(),
        DIR_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::create_dir_all(&dir).expect("failed to create static dir");
    dir
}

/// Router wired to the given stub gateway.
pub fn app_with_gateway(stub: &StubGateway) -> axum::Router {
    let state = AppState {
        gateway: Some(Arc::new(gateway_client(&stub.base_url, TEST_TOKEN))),
        static_dir: temp_static_dir(),
    };
    routes::router(state)
}

/// Router in the gateway-disabled configuration.
pub fn app_without_gateway() -> axum::Router {
    let state = AppState {
        gateway: None,
        static_dir: temp_static_dir(),
    };
    routes::router(state)
}

/// Router serving the given directory as the frontend bundle, gateway
/// disabled.
pub fn app_with_static_dir(static_dir: PathBuf) -> axum::Router {
    let state = AppState {
        gateway: None,
        static_dir,
    };
    routes::router(state)
}

pub fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> http::Request<Body> {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> http::Request<Body> {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn parse_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
