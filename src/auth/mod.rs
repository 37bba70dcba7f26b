//! Authentication — API-key credentials and per-request signing headers.
//!
//! ## Security Model
//!
//! - Credentials are supplied once, at client construction, and never change.
//! - Every signed call derives a fresh `{timestamp, signature}` pair through
//!   [`AuthHeaders::sign`], a pure function. Nothing is mutated in place, so a
//!   single client can be shared by concurrent callers.
//! - The secret never appears in `Debug` output or logs.

pub mod signer;

use chrono::Utc;

use crate::error::SdkError;

/// Header carrying the API key identifier.
pub const KEY_ID_HEADER: &str = "ENCLAVE-KEY-ID";

/// Header carrying the signing timestamp (epoch milliseconds).
pub const TIMESTAMP_HEADER: &str = "ENCLAVE-TIMESTAMP";

/// Header carrying the hex-encoded HMAC-SHA256 signature.
pub const SIGN_HEADER: &str = "ENCLAVE-SIGN";

/// Environment variable holding the key id.
pub const KEY_ID_ENV: &str = "ENCLAVE_KEY";

/// Environment variable holding the key secret.
pub const KEY_SECRET_ENV: &str = "ENCLAVE_SECRET";

// ============================================================================
// Credentials
// ============================================================================

/// API key credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    key_id: String,
    key_secret: String,
}

impl ApiKey {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }

    /// Read credentials from `ENCLAVE_KEY` / `ENCLAVE_SECRET`.
    pub fn from_env() -> Result<Self, SdkError> {
        let key_id = std::env::var(KEY_ID_ENV)
            .map_err(|_| SdkError::Validation(format!("{} is not set", KEY_ID_ENV)))?;
        let key_secret = std::env::var(KEY_SECRET_ENV)
            .map_err(|_| SdkError::Validation(format!("{} is not set", KEY_SECRET_ENV)))?;
        Ok(Self::new(key_id, key_secret))
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub(crate) fn key_secret(&self) -> &str {
        &self.key_secret
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Signed headers
// ============================================================================

/// The three authentication headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub key_id: String,
    pub timestamp: String,
    pub signature: String,
}

impl AuthHeaders {
    /// Sign a request at the current time.
    ///
    /// `body` must be the exact text that will be transmitted (empty when no
    /// body is sent) and `path` the exact path and query of the request URL.
    pub fn sign(credentials: &ApiKey, method: &str, path: &str, body: &str) -> Self {
        Self::sign_at(credentials, Utc::now().timestamp_millis(), method, path, body)
    }

    /// Sign a request with an explicit millisecond timestamp.
    pub fn sign_at(
        credentials: &ApiKey,
        timestamp_ms: i64,
        method: &str,
        path: &str,
        body: &str,
    ) -> Self {
        let timestamp = timestamp_ms.to_string();
        let signature =
            signer::sign_hex(credentials.key_secret(), &timestamp, method, path, body);
        Self {
            key_id: credentials.key_id().to_string(),
            timestamp,
            signature,
        }
    }

    /// `(name, value)` pairs in header order.
    pub fn to_pairs(&self) -> [(&'static str, &str); 3] {
        [
            (KEY_ID_HEADER, self.key_id.as_str()),
            (TIMESTAMP_HEADER, self.timestamp.as_str()),
            (SIGN_HEADER, self.signature.as_str()),
        ]
    }

    /// Whether `name` is one of the authentication header names.
    pub fn is_auth_header(name: &str) -> bool {
        [KEY_ID_HEADER, TIMESTAMP_HEADER, SIGN_HEADER]
            .iter()
            .any(|h| h.eq_ignore_ascii_case(name))
    }
}
