//! Token-bucket rate limiting for outbound requests.
//!
//! [`RateLimiter`] wraps a `governor` bucket; [`RateLimitedTransport`] is a
//! decorator over [`HttpTransport`] that waits for a token before every
//! outbound call. A wait can be abandoned through a [`CancellationToken`], in
//! which case no token is consumed and nothing is sent.
//!
//! Waiting happens in the caller's task. Never await a send while holding a
//! lock that other rate-limited callers need: the wait can last a full refill
//! interval, and everyone queued behind the lock would stall with it.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovernorRateLimiter,
};
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::HttpError;
use crate::http::serializer;
use crate::http::transport::HttpTransport;

type Limiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Bucket shape: up to `burst` calls at once, one token back every `replenish_every`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub burst: NonZeroU32,
    pub replenish_every: Duration,
}

impl RateLimit {
    pub fn new(burst: NonZeroU32, replenish_every: Duration) -> Self {
        Self {
            burst,
            replenish_every,
        }
    }

    /// `n` calls per second, with a burst of `n`.
    pub fn per_second(n: NonZeroU32) -> Self {
        Self {
            burst: n,
            replenish_every: Duration::from_secs(1) / n.get(),
        }
    }

    fn quota(&self) -> Quota {
        // A zero period would mean an unbounded rate.
        Quota::with_period(self.replenish_every)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MAX))
            .allow_burst(self.burst)
    }
}

/// Shared token bucket. Clones draw from the same bucket.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Limiter>,
    limit: RateLimit,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").field("limit", &self.limit).finish()
    }
}

impl RateLimiter {
    pub fn new(limit: RateLimit) -> Self {
        Self {
            limiter: Arc::new(GovernorRateLimiter::direct(limit.quota())),
            limit,
        }
    }

    pub fn limit(&self) -> RateLimit {
        self.limit
    }

    /// Take a token if one is available right now.
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }

    /// Wait for a token, or fail with [`HttpError::Cancelled`] once `cancel` fires.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), HttpError> {
        if cancel.is_cancelled() {
            return Err(HttpError::Cancelled);
        }
        if self.try_acquire() {
            return Ok(());
        }

        debug!(burst = self.limit.burst.get(), "Waiting for rate limiter");
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(HttpError::Cancelled),
            _ = self.limiter.until_ready() => Ok(()),
        }
    }

    /// Wait for a token, giving up at `deadline`.
    pub async fn acquire_until(&self, deadline: Instant) -> Result<(), HttpError> {
        let cancel = CancellationToken::new();
        tokio::time::timeout_at(deadline, self.acquire(&cancel))
            .await
            .map_err(|_| HttpError::Cancelled)?
    }
}

// ─── Decorator ──────────────────────────────────────────────────────────────

/// [`HttpTransport`] that holds every call until the bucket has a token.
///
/// Same send contract as the inner transport; the only additions are the wait
/// and cancellation. An [`unlimited`](Self::unlimited) transport never waits
/// but still honors the cancellation token.
#[derive(Debug, Clone)]
pub struct RateLimitedTransport {
    inner: HttpTransport,
    limiter: Option<RateLimiter>,
}

impl RateLimitedTransport {
    pub fn new(inner: HttpTransport, limit: RateLimit) -> Self {
        Self::with_limiter(inner, RateLimiter::new(limit))
    }

    /// Wrap `inner` around an existing bucket, shared with other transports.
    pub fn with_limiter(inner: HttpTransport, limiter: RateLimiter) -> Self {
        Self {
            inner,
            limiter: Some(limiter),
        }
    }

    /// No bucket: calls go out immediately unless `cancel` has fired.
    pub fn unlimited(inner: HttpTransport) -> Self {
        Self {
            inner,
            limiter: None,
        }
    }

    pub fn limiter(&self) -> Option<&RateLimiter> {
        self.limiter.as_ref()
    }

    pub fn inner(&self) -> &HttpTransport {
        &self.inner
    }

    /// Rate-limited [`HttpTransport::send`]. Cancelling during the wait skips the request.
    pub async fn send<Req, Res>(
        &self,
        method: Method,
        url: &str,
        request: &Req,
        headers: &HeaderMap,
        cancel: &CancellationToken,
    ) -> Result<Res, HttpError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let body = serializer::to_json_text(request)?;
        self.send_text(method, url, &body, headers, cancel).await
    }

    pub async fn send_text<Res: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: &str,
        headers: &HeaderMap,
        cancel: &CancellationToken,
    ) -> Result<Res, HttpError> {
        self.send_text_with(method, url, body, || Ok(headers.clone()), cancel)
            .await
    }

    pub async fn send_raw(
        &self,
        method: Method,
        url: &str,
        body: &str,
        headers: &HeaderMap,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, HttpError> {
        self.send_raw_with(method, url, body, || Ok(headers.clone()), cancel)
            .await
    }

    /// Like [`send_text`](Self::send_text), with headers built only once a
    /// token is granted. Request signatures carry a timestamp and must be
    /// computed after the wait, not before it.
    pub async fn send_text_with<Res, F>(
        &self,
        method: Method,
        url: &str,
        body: &str,
        headers: F,
        cancel: &CancellationToken,
    ) -> Result<Res, HttpError>
    where
        Res: DeserializeOwned,
        F: FnOnce() -> Result<HeaderMap, HttpError>,
    {
        let headers = self.admit(headers, cancel).await?;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(HttpError::Cancelled),
            res = self.inner.send_text(method, url, body, &headers) => res,
        }
    }

    /// Raw-body counterpart of [`send_text_with`](Self::send_text_with).
    pub async fn send_raw_with<F>(
        &self,
        method: Method,
        url: &str,
        body: &str,
        headers: F,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, HttpError>
    where
        F: FnOnce() -> Result<HeaderMap, HttpError>,
    {
        let headers = self.admit(headers, cancel).await?;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(HttpError::Cancelled),
            res = self.inner.send_raw(method, url, body, &headers) => res,
        }
    }

    async fn admit<F>(&self, headers: F, cancel: &CancellationToken) -> Result<HeaderMap, HttpError>
    where
        F: FnOnce() -> Result<HeaderMap, HttpError>,
    {
        match &self.limiter {
            Some(limiter) => limiter.acquire(cancel).await?,
            None if cancel.is_cancelled() => return Err(HttpError::Cancelled),
            None => {}
        }
        headers()
    }
}
