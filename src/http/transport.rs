//! Generic JSON-over-HTTP transport — `HttpTransport`.
//!
//! One request per call, no retries. The HTTP status decides which branch a
//! reply takes:
//!
//! - 200 / 201 / 202: the body is decoded as the reply type (or returned raw
//!   in CSV mode). An empty JSON body is [`HttpError::EmptyResponseBody`].
//! - anything else: [`HttpError::Status`] with the numeric status, the raw
//!   body text, and the envelope's `error` field when it can be decoded.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::HttpError;
use crate::http::serializer;

/// Status codes routed to the success branch.
pub const SUCCESS_STATUSES: [u16; 3] = [200, 201, 202];

pub fn is_success_status(status: u16) -> bool {
    SUCCESS_STATUSES.contains(&status)
}

/// Best-effort view of a non-success body. The venue reuses the success
/// envelope for errors, so only `error` matters here.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Low-level JSON transport over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Transport with the default `reqwest` client: pooled connections, no timeout.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Transport with an overall per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Serialize `request`, send it, and decode the success reply.
    ///
    /// A request that serializes to `null` is sent without a body.
    pub async fn send<Req, Res>(
        &self,
        method: Method,
        url: &str,
        request: &Req,
        headers: &HeaderMap,
    ) -> Result<Res, HttpError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let body = serializer::to_json_text(request)?;
        self.send_text(method, url, &body, headers).await
    }

    /// Send an already-serialized body and decode the success reply.
    ///
    /// Used by callers that sign the body text and need the exact same bytes
    /// on the wire.
    pub async fn send_text<Res: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: &str,
        headers: &HeaderMap,
    ) -> Result<Res, HttpError> {
        let bytes = self.execute(method, url, body, headers).await?;
        serializer::from_json_bytes(&bytes)
    }

    /// CSV mode: send and hand back the raw success body without JSON decoding.
    pub async fn send_raw(
        &self,
        method: Method,
        url: &str,
        body: &str,
        headers: &HeaderMap,
    ) -> Result<Vec<u8>, HttpError> {
        self.execute(method, url, body, headers).await
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: &str,
        headers: &HeaderMap,
    ) -> Result<Vec<u8>, HttpError> {
        let wire_body = serializer::wire_body(body);

        let mut req_headers = headers.clone();
        if wire_body.is_some() && !req_headers.contains_key(CONTENT_TYPE) {
            req_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        tracing::debug!(
            method = %method,
            url,
            body_len = wire_body.map_or(0, str::len),
            "Sending request"
        );

        let mut req = self.client.request(method.clone(), url).headers(req_headers);
        if let Some(b) = wire_body {
            req = req.body(b.to_owned());
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?.to_vec();

        tracing::debug!(method = %method, url, status, bytes = bytes.len(), "Received response");

        if !is_success_status(status) {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|e| e.error)
                .filter(|m| !m.is_empty());
            tracing::warn!(method = %method, url, status, "Request returned non-success status");
            return Err(HttpError::Status {
                status,
                body,
                message,
            });
        }

        Ok(bytes)
    }
}
