//! JSON text conversion for request and reply payloads.
//!
//! A request value that serializes to the literal `null` (no payload, `None`,
//! `()`) is the "no body" sentinel: the transport sends no body at all for it.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::HttpError;

/// Serialized form of an absent request body.
pub const NULL_BODY: &str = "null";

/// Serialize a request value to JSON text.
pub fn to_json_text<T: Serialize + ?Sized>(value: &T) -> Result<String, HttpError> {
    serde_json::to_string(value).map_err(HttpError::Serialize)
}

/// Decode JSON text into `T`.
///
/// An empty input is [`HttpError::EmptyResponseBody`], never a syntax error,
/// so callers can tell "nothing returned" apart from "malformed body".
pub fn from_json_text<T: DeserializeOwned>(text: &str) -> Result<T, HttpError> {
    if text.is_empty() {
        return Err(HttpError::EmptyResponseBody);
    }
    serde_json::from_str(text).map_err(|source| HttpError::Decode {
        source,
        body: text.to_string(),
    })
}

/// Decode a raw reply body into `T`.
///
/// Same contract as [`from_json_text`]. Bytes that are not valid UTF-8 are a
/// decode failure; the body kept on the error is a lossy rendering for display.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, HttpError> {
    if bytes.is_empty() {
        return Err(HttpError::EmptyResponseBody);
    }
    serde_json::from_slice(bytes).map_err(|source| HttpError::Decode {
        source,
        body: String::from_utf8_lossy(bytes).into_owned(),
    })
}

/// The bytes to put on the wire for a serialized body, or `None` for the sentinel.
pub fn wire_body(text: &str) -> Option<&str> {
    if text == NULL_BODY {
        None
    } else {
        Some(text)
    }
}
