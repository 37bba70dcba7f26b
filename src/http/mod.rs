//! HTTP layer: JSON serializer, transport and rate limiting.

pub mod rate_limit;
pub mod serializer;
pub mod transport;

pub use rate_limit::{RateLimit, RateLimitedTransport, RateLimiter};
pub use transport::{HttpTransport, SUCCESS_STATUSES};
