//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Domain types as the venue sends them (serde-ready)
//! - `wire.rs` — Request bodies and query builders, where the endpoint has any
//! - `client.rs` — Sub-client with the endpoint methods

pub mod account;
pub mod fill;
pub mod market;
pub mod order;
pub mod status;
