//! In-process stand-in for the `commentThreads` endpoint.
//!
//! Responses are served in order, one per request; once the script runs out
//! the last response is repeated.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: Value,
}

impl MockResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn status(status: u16, body: Value) -> Self {
        Self { status, body }
    }
}

struct MockState {
    responses: Vec<MockResponse>,
    hits: AtomicUsize,
    queries: Mutex<Vec<HashMap<String, String>>>,
}

pub struct MockYoutube {
    /// Value for `Config::api_base`
    pub base: String,
    state: Arc<MockState>,
}

impl MockYoutube {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.state.queries.lock().unwrap().clone()
    }
}

async fn comment_threads(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let index = state.hits.fetch_add(1, Ordering::SeqCst);
    state.queries.lock().unwrap().push(params);

    let response = state
        .responses
        .get(index)
        .or_else(|| state.responses.last())
        .cloned()
        .unwrap_or_else(|| MockResponse::ok(page_json(&[], None)));

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body))
}

pub async fn spawn_mock(responses: Vec<MockResponse>) -> MockYoutube {
    let state = Arc::new(MockState {
        responses,
        hits: AtomicUsize::new(0),
        queries: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/youtube/v3/commentThreads", get(comment_threads))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockYoutube {
        base: format!("http://{}/youtube/v3", addr),
        state,
    }
}

/// One page of `commentThreads` output with the given display texts.
pub fn page_json(texts: &[&str], next_page_token: Option<&str>) -> Value {
    let items: Vec<Value> = texts
        .iter()
        .map(|text| {
            json!({
                "kind": "youtube#commentThread",
                "snippet": {
                    "topLevelComment": {
                        "kind": "youtube#comment",
                        "snippet": { "textDisplay": text, "likeCount": 0 }
                    },
                    "totalReplyCount": 0
                }
            })
        })
        .collect();

    let mut page = json!({ "kind": "youtube#commentThreadListResponse", "items": items });
    if let Some(token) = next_page_token {
        page["nextPageToken"] = json!(token);
    }
    page
}

/// Page of `count` comments named `comment {start}`, `comment {start + 1}`, ...
pub fn numbered_page(start: usize, count: usize, next_page_token: Option<&str>) -> Value {
    let texts: Vec<String> = (start..start + count).map(|i| format!("comment {}", i)).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    page_json(&refs, next_page_token)
}

pub fn error_json(code: u16, message: &str) -> Value {
    json!({
        "error": {
            "code": code,
            "message": message,
            "errors": [{ "message": message, "domain": "youtube.quota", "reason": "quotaExceeded" }]
        }
    })
}
