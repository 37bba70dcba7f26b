//! # Enclave SDK
//!
//! A Rust client for the Enclave Markets REST API.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Identifiers, envelopes, domain models (always available)
//! 2. **Auth** — API-key credentials and HMAC-SHA256 request signing
//! 3. **HTTP** — `HttpTransport`, the JSON serializer and the rate-limited decorator
//! 4. **High-Level Client** — `EnclaveClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use enclave_sdk::prelude::*;
//!
//! let client = EnclaveClient::builder()
//!     .environment(Environment::Sandbox)
//!     .api_key(ApiKey::from_env()?)
//!     .build()?;
//!
//! let markets = client.markets().list().await?;
//! let book = client.markets().depth(&Market::from("AVAX-USDC")).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Response envelopes: `{success, result, error}` and paginated pages.
pub mod envelope;

/// Domain modules (vertical slices): wire types and sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Environments and network constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// API-key credentials and request signing.
pub mod auth;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// JSON transport, serializer and rate limiting.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `EnclaveClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AccountId, BookLevel, FillId, Market, OrderId, Side, Symbol};

    // Envelopes
    pub use crate::envelope::{Envelope, PageInfo, PageResponse};

    // Domain types
    pub use crate::domain::account::{Balance, GetBalanceRequest};
    pub use crate::domain::fill::{Fill, FillParams};
    pub use crate::domain::market::{BookSnapshot, CurrencyPair, MarketsResult, SpotMarket};
    pub use crate::domain::order::{
        AddOrderRequest, CancelReason, Order, OrderState, OrderType, TimeInForce,
    };
    pub use crate::domain::status::PublicStatus;

    // Errors
    pub use crate::error::{HttpError, SdkError};

    // Network
    pub use crate::network::{Environment, DEFAULT_API_URL};

    // Auth
    pub use crate::auth::{ApiKey, AuthHeaders};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        AccountClient, EnclaveClient, EnclaveClientBuilder, FillsClient, MarketsClient,
        OrdersClient, StatusClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::{HttpTransport, RateLimit, RateLimitedTransport};
}
