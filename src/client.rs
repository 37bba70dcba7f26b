//! High-level client — `EnclaveClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the frozen per-client configuration, and the
//! single request path every endpoint goes through: build path, serialize the
//! body once, sign those exact bytes, merge default headers, send.

use crate::auth::{ApiKey, AuthHeaders};
use crate::domain::account::client::Account;
use crate::domain::fill::client::Fills;
use crate::domain::market::client::Markets;
use crate::domain::order::client::Orders;
use crate::domain::status::client::Status;
use crate::error::{HttpError, SdkError};
use crate::http::serializer;
use crate::http::{HttpTransport, RateLimit, RateLimitedTransport};
use crate::network::Environment;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

// Re-export sub-client types for convenience.
pub use crate::domain::account::client::Account as AccountClient;
pub use crate::domain::fill::client::Fills as FillsClient;
pub use crate::domain::market::client::Markets as MarketsClient;
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::status::client::Status as StatusClient;

/// Whether a call carries the authentication headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    /// Never signed, even when credentials are configured.
    Public,
    /// Signed when credentials are configured.
    Signed,
}

/// The primary entry point for the Enclave SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.orders()`, `client.fills()`, etc.
///
/// All configuration is fixed at [`EnclaveClientBuilder::build`]. Clones share
/// the connection pool, the rate-limit bucket and the cancellation token, so a
/// client can be handed to any number of concurrent tasks.
#[derive(Debug, Clone)]
pub struct EnclaveClient {
    base_url: String,
    transport: RateLimitedTransport,
    credentials: Option<ApiKey>,
    default_headers: Arc<HeaderMap>,
    cancellation_token: CancellationToken,
}

impl EnclaveClient {
    pub fn builder() -> EnclaveClientBuilder {
        EnclaveClientBuilder::default()
    }

    /// Unauthenticated client for `base_url`.
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        Self::builder().base_url(base_url).build()
    }

    /// Unauthenticated client for a named environment (`"sandbox"` or `"prod"`).
    pub fn from_env_name(env: &str) -> Result<Self, SdkError> {
        let environment: Environment = env.parse()?;
        Self::builder().environment(environment).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Cancel all pending and future requests made through this client and its clones.
    ///
    /// This is permanent. To abandon a single call, drop its future instead
    /// (for example through `tokio::time::timeout`); a call dropped while it
    /// waits for the rate limiter never reaches the network.
    pub fn cancel_all_requests(&self) {
        self.cancellation_token.cancel();
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn status(&self) -> Status<'_> {
        Status { client: self }
    }

    pub fn account(&self) -> Account<'_> {
        Account { client: self }
    }

    pub fn markets(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn fills(&self) -> Fills<'_> {
        Fills { client: self }
    }

    // ── Request path ─────────────────────────────────────────────────────

    /// Send `body` (or no body) to `path` and decode the JSON reply.
    ///
    /// `path` includes the query string; it is signed exactly as given.
    pub(crate) async fn send<Req, Res>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Req>,
        access: Access,
    ) -> Result<Res, HttpError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let text = serializer::to_json_text(&body)?;
        let url = self.url(path);

        self.transport
            .send_text_with(
                method.clone(),
                &url,
                &text,
                || self.request_headers(&method, path, &text, access),
                &self.cancellation_token,
            )
            .await
    }

    pub(crate) async fn get<Res: DeserializeOwned>(
        &self,
        path: &str,
        access: Access,
    ) -> Result<Res, HttpError> {
        self.send(Method::GET, path, None::<&()>, access).await
    }

    pub(crate) async fn delete<Res: DeserializeOwned>(&self, path: &str) -> Result<Res, HttpError> {
        self.send(Method::DELETE, path, None::<&()>, Access::Signed)
            .await
    }

    /// CSV mode: signed bodyless GET whose success body is returned undecoded.
    pub(crate) async fn get_raw(&self, path: &str) -> Result<Vec<u8>, HttpError> {
        let text = serializer::NULL_BODY;
        let url = self.url(path);

        self.transport
            .send_raw_with(
                Method::GET,
                &url,
                text,
                || self.request_headers(&Method::GET, path, text, Access::Signed),
                &self.cancellation_token,
            )
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Auth headers for this exact request (signed now), then the default
    /// headers. Defaults never replace an auth header.
    fn request_headers(
        &self,
        method: &Method,
        path: &str,
        body_text: &str,
        access: Access,
    ) -> Result<HeaderMap, HttpError> {
        let mut headers = HeaderMap::new();

        let credentials = match access {
            Access::Signed => self.credentials.as_ref(),
            Access::Public => None,
        };
        if let Some(credentials) = credentials {
            let signed_body = serializer::wire_body(body_text).unwrap_or("");
            let auth = AuthHeaders::sign(credentials, method.as_str(), path, signed_body);
            for (name, value) in auth.to_pairs() {
                headers.insert(header_name(name)?, header_value(value)?);
            }
        }

        for (name, value) in self.default_headers.iter() {
            if !AuthHeaders::is_auth_header(name.as_str()) {
                headers.append(name.clone(), value.clone());
            }
        }

        tracing::debug!(
            method = %method,
            path,
            signed = credentials.is_some(),
            "Prepared request headers"
        );

        Ok(headers)
    }
}

fn header_name(name: &str) -> Result<HeaderName, HttpError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| HttpError::InvalidHeader(format!("{}: {}", name, e)))
}

fn header_value(value: &str) -> Result<HeaderValue, HttpError> {
    HeaderValue::from_str(value).map_err(|e| HttpError::InvalidHeader(e.to_string()))
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct EnclaveClientBuilder {
    base_url: String,
    credentials: Option<ApiKey>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    rate_limit: Option<RateLimit>,
    cancellation_token: Option<CancellationToken>,
}

impl Default for EnclaveClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            credentials: None,
            headers: Vec::new(),
            timeout: None,
            rate_limit: None,
            cancellation_token: None,
        }
    }
}

impl EnclaveClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.base_url = environment.api_url().to_string();
        self
    }

    /// Sign every non-public request with these credentials.
    pub fn api_key(mut self, credentials: ApiKey) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Add a default header sent with every request (e.g. a routing header).
    ///
    /// Authentication header names are ignored here; they are always computed
    /// per request.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Overall per-request timeout. None by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Hold every request until the token bucket has room.
    pub fn rate_limit(mut self, limit: RateLimit) -> Self {
        self.rate_limit = Some(limit);
        self
    }

    /// Use an externally owned token instead of a fresh one.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn build(self) -> Result<EnclaveClient, SdkError> {
        if self.base_url.is_empty() {
            return Err(SdkError::Validation("base url must not be empty".to_string()));
        }

        if let Some(credentials) = &self.credentials {
            HeaderValue::from_str(credentials.key_id())
                .map_err(|_| SdkError::Validation("key id is not a valid header value".into()))?;
        }

        let mut default_headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = header_name(name).map_err(|e| SdkError::Validation(e.to_string()))?;
            let value = header_value(value).map_err(|e| SdkError::Validation(e.to_string()))?;
            default_headers.insert(name, value);
        }

        let inner = match self.timeout {
            Some(timeout) => HttpTransport::with_timeout(timeout)
                .map_err(|e| SdkError::Validation(e.to_string()))?,
            None => HttpTransport::new(),
        };
        let transport = match self.rate_limit {
            Some(limit) => RateLimitedTransport::new(inner, limit),
            None => RateLimitedTransport::unlimited(inner),
        };

        Ok(EnclaveClient {
            base_url: self.base_url,
            transport,
            credentials: self.credentials,
            default_headers: Arc::new(default_headers),
            cancellation_token: self.cancellation_token.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{signer, KEY_ID_HEADER, SIGN_HEADER, TIMESTAMP_HEADER};

    fn signed_client() -> EnclaveClient {
        EnclaveClient::builder()
            .base_url("http://localhost:9/")
            .api_key(ApiKey::new("key-1", "secret"))
            .header("X-Route", "blue")
            .header(SIGN_HEADER, "forged")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let client = EnclaveClient::builder().build().unwrap();
        assert_eq!(client.base_url(), crate::network::DEFAULT_API_URL);
        assert!(!client.has_credentials());
        assert!(!client.cancellation_token().is_cancelled());
    }

    #[test]
    fn test_from_env_name() {
        let prod = EnclaveClient::from_env_name("PROD").unwrap();
        assert_eq!(prod.base_url(), crate::network::PROD_API_URL);
        assert!(EnclaveClient::from_env_name("staging").is_err());
    }

    #[test]
    fn test_builder_rejects_bad_header() {
        let err = EnclaveClient::builder()
            .header("bad header", "v")
            .build()
            .unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));
    }

    #[test]
    fn test_signed_headers_cover_exact_body() {
        let client = signed_client();
        let body = r#"{"symbol":"AVAX"}"#;
        let headers = client
            .request_headers(&Method::POST, "/v0/get_balance", body, Access::Signed)
            .unwrap();

        let ts = headers[TIMESTAMP_HEADER].to_str().unwrap();
        let sig = headers[SIGN_HEADER].to_str().unwrap();
        assert_eq!(headers[KEY_ID_HEADER], "key-1");
        assert!(signer::verify_hex("secret", ts, "POST", "/v0/get_balance", body, sig));
        assert_eq!(headers["x-route"], "blue");
    }

    #[test]
    fn test_null_body_signs_empty_string() {
        let client = signed_client();
        let headers = client
            .request_headers(&Method::GET, "/v1/orders", serializer::NULL_BODY, Access::Signed)
            .unwrap();
        let ts = headers[TIMESTAMP_HEADER].to_str().unwrap();
        let sig = headers[SIGN_HEADER].to_str().unwrap();
        assert!(signer::verify_hex("secret", ts, "GET", "/v1/orders", "", sig));
    }

    #[test]
    fn test_default_headers_never_override_auth() {
        let client = signed_client();
        let headers = client
            .request_headers(&Method::GET, "/v1/orders", serializer::NULL_BODY, Access::Signed)
            .unwrap();
        assert_eq!(headers.get_all(SIGN_HEADER).iter().count(), 1);
        assert_ne!(headers[SIGN_HEADER], "forged");
    }

    #[test]
    fn test_public_access_is_unsigned() {
        let client = signed_client();
        let headers = client
            .request_headers(&Method::GET, "/status", serializer::NULL_BODY, Access::Public)
            .unwrap();
        assert!(!headers.contains_key(KEY_ID_HEADER));
        assert!(!headers.contains_key(SIGN_HEADER));
        assert_eq!(headers["x-route"], "blue");
    }

    #[test]
    fn test_rate_limit_goes_through_transport() {
        assert!(signed_client().transport.limiter().is_none());

        let limited = EnclaveClient::builder()
            .rate_limit(RateLimit::per_second(std::num::NonZeroU32::new(5).unwrap()))
            .build()
            .unwrap();
        let limiter = limited.transport.limiter().unwrap();
        assert_eq!(limiter.limit().burst.get(), 5);
    }

    #[tokio::test]
    async fn test_cancelled_client_sends_nothing() {
        let client = signed_client();
        client.cancel_all_requests();
        let err = client
            .get::<serde_json::Value>("/status", Access::Public)
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::Cancelled));
    }
}
