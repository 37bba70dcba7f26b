//! HMAC-SHA256 request signing.
//!
//! The venue recomputes `HMAC-SHA256(secret, timestamp + method + path + body)`
//! over the exact same byte concatenation, with no delimiters, so every
//! component must be passed exactly as it goes on the wire.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(secret: &str, timestamp: &str, method: &str, path: &str, body: &str) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    mac.update(method.as_bytes());
    mac.update(path.as_bytes());
    mac.update(body.as_bytes());
    mac
}

/// Raw HMAC-SHA256 of `timestamp + method + path + body`.
pub fn sign(secret: &str, timestamp: &str, method: &str, path: &str, body: &str) -> Vec<u8> {
    keyed_mac(secret, timestamp, method, path, body)
        .finalize()
        .into_bytes()
        .to_vec()
}

/// Hex-encoded signature, as sent in the signature header.
pub fn sign_hex(secret: &str, timestamp: &str, method: &str, path: &str, body: &str) -> String {
    hex::encode(sign(secret, timestamp, method, path, body))
}

/// Constant-time check of a hex signature against the recomputed one.
pub fn verify_hex(
    secret: &str,
    timestamp: &str,
    method: &str,
    path: &str,
    body: &str,
    signature: &str,
) -> bool {
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    keyed_mac(secret, timestamp, method, path, body)
        .verify_slice(&expected)
        .is_ok()
}
