//! Shared test utilities: a mock gourmet search server and fixtures.

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use gourmet::api::{HotPepperClient, ShopSource};
use gourmet::app::{handle_event, Action, AppState};
use gourmet::infrastructure::ApiKey;
use gourmet::worker::{FetchWorker, WorkerResponse};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const TEST_KEY: &str = "test-key-0123";

/// How the mock answers every request.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Serves `total` generated shops, paged by `start`/`count`.
    Pages { total: usize },
    /// HTTP 200 with a `results.error` payload.
    ApiError { code: i64, message: String },
    /// Bare status code with an empty body.
    Status(u16),
    /// Like `Pages`, after sleeping.
    Slow { total: usize, delay: Duration },
}

#[derive(Clone)]
struct MockState {
    behavior: Arc<Mutex<Behavior>>,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

/// Mock gourmet API bound to an ephemeral port.
pub struct MockHotPepper {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockHotPepper {
    pub async fn start(behavior: Behavior) -> Self {
        let state = MockState {
            behavior: Arc::new(Mutex::new(behavior)),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new().fallback(handle_search).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/hotpepper/gourmet/v1/", self.addr)
    }

    pub fn client(&self) -> HotPepperClient {
        HotPepperClient::new(self.endpoint(), ApiKey::new(TEST_KEY)).unwrap()
    }

    pub fn source(&self) -> Arc<dyn ShopSource> {
        Arc::new(self.client())
    }

    pub fn set_behavior(&self, behavior: Behavior) {
        *self.state.behavior.lock().unwrap() = behavior;
    }

    /// Query parameters of every request received so far.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The `start` parameter of every request, in order.
    pub fn starts(&self) -> Vec<usize> {
        self.requests()
            .iter()
            .filter_map(|params| params.get("start")?.parse().ok())
            .collect()
    }
}

impl Drop for MockHotPepper {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_search(State(state): State<MockState>, Query(params): Query<HashMap<String, String>>) -> Response {
    let behavior = state.behavior.lock().unwrap().clone();
    let start: usize = params.get("start").and_then(|s| s.parse().ok()).unwrap_or(1);
    let count: usize = params.get("count").and_then(|s| s.parse().ok()).unwrap_or(20);
    state.requests.lock().unwrap().push(params);

    match behavior {
        Behavior::Pages { total } => axum::Json(page_body(total, start, count)).into_response(),
        Behavior::Slow { total, delay } => {
            tokio::time::sleep(delay).await;
            axum::Json(page_body(total, start, count)).into_response()
        }
        Behavior::ApiError { code, message } => axum::Json(json!({
            "results": {
                "api_version": "1.26",
                "error": [{ "code": code, "message": message }]
            }
        }))
        .into_response(),
        Behavior::Status(code) => StatusCode::from_u16(code).unwrap().into_response(),
    }
}

fn page_body(total: usize, start: usize, count: usize) -> serde_json::Value {
    let first = start.saturating_sub(1);
    let last = (first + count).min(total);
    let shops: Vec<serde_json::Value> = (first..last).map(shop_json).collect();

    json!({
        "results": {
            "api_version": "1.26",
            "results_available": total,
            "results_returned": shops.len().to_string(),
            "results_start": start,
            "shop": shops
        }
    })
}

/// Shop `i`: even shops have only a desktop coupon, odd ones both.
pub fn shop_json(i: usize) -> serde_json::Value {
    let sp = if i % 2 == 0 { String::new() } else { format!("https://sp.example/J{i:04}") };
    json!({
        "id": format!("J{i:04}"),
        "name": format!("Ramen Shop {i}"),
        "address": format!("Tokyo, Shibuya {i}-1"),
        "logo_image": format!("https://img.example/J{i:04}.jpg"),
        "genre": { "code": "G013", "name": "ラーメン" },
        "coupon_urls": { "pc": format!("https://pc.example/J{i:04}"), "sp": sp }
    })
}

/// Runtime plus worker wired to a mock server, for driving the state
/// machine the way the terminal loop does.
pub struct Harness {
    pub worker: FetchWorker,
    pub responses: Receiver<WorkerResponse>,
    pub server: MockHotPepper,
    pub runtime: tokio::runtime::Runtime,
}

impl Harness {
    pub fn new(behavior: Behavior, timeout: Duration) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(MockHotPepper::start(behavior));
        let (worker, responses) = FetchWorker::new(runtime.handle().clone(), server.source(), timeout);

        Self {
            worker,
            responses,
            server,
            runtime,
        }
    }

    /// Executes fetch actions; other actions are returned untouched.
    pub fn execute(&mut self, actions: Vec<Action>) -> Vec<Action> {
        let mut rest = vec![];
        for action in actions {
            match action {
                Action::StartFetch(request) => self.worker.spawn(request),
                Action::CancelFetch { generation } => {
                    self.worker.cancel(generation);
                }
                other => rest.push(other),
            }
        }
        rest
    }

    /// Waits for one completion and feeds it to the state machine.
    pub fn complete_one(&mut self, state: &mut AppState) -> Vec<Action> {
        let response = self
            .responses
            .recv_timeout(Duration::from_secs(5))
            .expect("fetch completion");
        self.worker.complete(response.generation());
        handle_event(state, response.into()).1
    }
}
