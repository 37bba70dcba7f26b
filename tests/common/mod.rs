//! In-process mock venue for integration tests.
//!
//! Every request is captured (method, path + query, headers, raw body bytes,
//! arrival time) and answered from a per-path script. Unscripted paths get
//! the venue's 404 envelope.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::sync::Mutex;

pub const TEST_KEY_ID: &str = "test-key";
pub const TEST_SECRET: &str = "test-secret";

pub const NOT_FOUND_BODY: &str = r#"{"success":false,"result":null,"error":"not found"}"#;

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.into(),
        }
    }

    pub fn ok(result: serde_json::Value) -> Self {
        Self::json(
            200,
            serde_json::json!({"success": true, "result": result}).to_string(),
        )
    }

    pub fn csv(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: "text/csv",
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    pub at: Instant,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Default)]
pub struct MockVenue {
    /// path + query → replies; the last reply repeats once earlier ones are used.
    script: Mutex<HashMap<String, Vec<Reply>>>,
    requests: Mutex<Vec<CapturedRequest>>,
}

impl MockVenue {
    pub async fn on(&self, path_and_query: &str, reply: Reply) {
        self.script
            .lock()
            .await
            .entry(path_and_query.to_string())
            .or_default()
            .push(reply);
    }

    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub async fn last_request(&self) -> CapturedRequest {
        self.requests
            .lock()
            .await
            .last()
            .cloned()
            .expect("no request captured")
    }

    async fn reply_for(&self, path_and_query: &str) -> Reply {
        let mut script = self.script.lock().await;
        match script.get_mut(path_and_query) {
            Some(replies) if replies.len() > 1 => replies.remove(0),
            Some(replies) if !replies.is_empty() => replies[0].clone(),
            _ => Reply::json(404, NOT_FOUND_BODY),
        }
    }
}

async fn handle(
    State(venue): State<Arc<MockVenue>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path_and_query = uri
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    venue.requests.lock().await.push(CapturedRequest {
        method: method.to_string(),
        path_and_query: path_and_query.clone(),
        headers,
        body: body.to_vec(),
        at: Instant::now(),
    });

    let reply = venue.reply_for(&path_and_query).await;
    let status = StatusCode::from_u16(reply.status).expect("invalid status");
    (status, [(header::CONTENT_TYPE, reply.content_type)], reply.body).into_response()
}

/// Start the venue on an ephemeral port; returns its base URL.
pub async fn start_mock_venue(venue: Arc<MockVenue>) -> String {
    let router = Router::new().fallback(handle).with_state(venue);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test server");
    let addr: SocketAddr = listener.local_addr().expect("missing local addr");

    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .expect("test server failed");
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    format!("http://{}", addr)
}

pub fn order_json(status: &str) -> serde_json::Value {
    serde_json::json!({
        "orderId": "o-1",
        "clientOrderId": "c-1",
        "side": "sell",
        "price": "21.12",
        "size": "0.01",
        "market": "AVAX-USDC",
        "filledSize": "0",
        "filledCost": "0",
        "fee": "0",
        "status": status,
        "createdAt": "2024-03-01T12:00:00Z",
        "type": "limit"
    })
}

pub fn fill_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "orderId": "o-1",
        "market": "AVAX-USDC",
        "price": "21.11",
        "size": "0.01",
        "side": "buy",
        "filledCost": "0.2111",
        "fee": "0.0002",
        "time": "2024-03-01T12:00:00Z"
    })
}
