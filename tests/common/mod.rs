#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// What the mock events endpoint answers for one page.
#[derive(Clone)]
pub enum Reply {
    Events(Vec<Value>),
    Status(u16),
    Raw(&'static str),
}

pub type Responder = Arc<dyn Fn(&str, u32) -> Reply + Send + Sync>;

#[derive(Clone)]
struct MockState {
    responder: Responder,
    hits: Arc<AtomicUsize>,
}

#[derive(Deserialize)]
struct PageQuery {
    per_page: usize,
    page: u32,
}

pub struct MockApi {
    pub base_url: String,
    pub hits: Arc<AtomicUsize>,
}

impl MockApi {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn events(
    State(state): State<MockState>,
    Path(user): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    assert_eq!(query.per_page, 30);
    match (state.responder)(&user, query.page) {
        Reply::Events(items) => Json(Value::Array(items)).into_response(),
        Reply::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap();
            (status, Json(json!({ "message": "mock" }))).into_response()
        }
        Reply::Raw(body) => (StatusCode::OK, body).into_response(),
    }
}

fn mock_router(state: MockState) -> Router {
    Router::new()
        .route("/users/:user/events", get(events))
        .with_state(state)
}

/// Serves the mock on the caller's runtime.
pub async fn spawn_mock(responder: impl Fn(&str, u32) -> Reply + Send + Sync + 'static) -> MockApi {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = MockState {
        responder: Arc::new(responder),
        hits: Arc::clone(&hits),
    };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, mock_router(state)).await.unwrap();
    });
    MockApi {
        base_url: format!("http://{addr}"),
        hits,
    }
}

/// Serves the mock on its own thread so it outlives any single test runtime.
pub fn spawn_mock_detached(responder: impl Fn(&str, u32) -> Reply + Send + Sync + 'static) -> MockApi {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let api = spawn_mock(responder).await;
            tx.send(api).unwrap();
            std::future::pending::<()>().await;
        });
    });
    rx.recv().unwrap()
}

pub fn push_event(created_at: &str, commits: usize) -> Value {
    let commits: Vec<Value> = (0..commits).map(|i| json!({ "sha": format!("{i:040}") })).collect();
    json!({
        "id": "1",
        "type": "PushEvent",
        "created_at": created_at,
        "payload": { "commits": commits }
    })
}

pub fn opened_event(kind: &str, created_at: &str) -> Value {
    json!({
        "id": "2",
        "type": kind,
        "created_at": created_at,
        "payload": { "action": "opened" }
    })
}

pub fn filler(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "id": i.to_string(),
                "type": "WatchEvent",
                "created_at": "2024-01-10T00:00:00Z",
                "payload": { "action": "started" }
            })
        })
        .collect()
}

/// The two-event January page used by the end-to-end scenarios.
pub fn alice_page() -> Vec<Value> {
    vec![
        push_event("2024-01-15T12:00:00Z", 3),
        opened_event("PullRequestEvent", "2024-01-20T09:30:00Z"),
    ]
}
