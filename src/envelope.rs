//! Response envelopes.
//!
//! Every enveloped reply has the shape `{"success": bool, "result": T, "error": string}`.
//! [`Envelope`] makes the discriminated result explicit: a success always
//! carries its result, a failure always carries a non-empty error message.
//!
//! A failure's `result` is whatever zero value the venue put there (`null`,
//! an all-empty struct, a struct with `null` lists). It is never decoded as `T`.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SdkError;
use crate::shared::serde_util::null_as_default;

/// Discriminated `{success, result, error}` reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success(T),
    Failure(String),
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            Envelope::Success(result) => Some(result),
            Envelope::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Failure(message) => Some(message),
        }
    }

    /// Turns `success: false` into [`SdkError::Api`] tagged with `operation`.
    pub fn into_result(self, operation: &'static str) -> Result<T, SdkError> {
        match self {
            Envelope::Success(result) => Ok(result),
            Envelope::Failure(message) => Err(SdkError::Api { operation, message }),
        }
    }
}

#[derive(Deserialize)]
struct RawEnvelope {
    success: bool,
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

impl<'de, T> Deserialize<'de> for Envelope<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawEnvelope::deserialize(deserializer)?;
        let error = raw.error.unwrap_or_default();

        if !raw.success {
            if error.is_empty() {
                return Err(D::Error::custom("unsuccessful envelope without an error message"));
            }
            return Ok(Envelope::Failure(error));
        }

        if !error.is_empty() {
            return Err(D::Error::custom(format!(
                "successful envelope carries an error: {}",
                error
            )));
        }

        match raw.result {
            Some(result) => T::deserialize(result)
                .map(Envelope::Success)
                .map_err(D::Error::custom),
            // Unit-like result types (`()`, `Value`, `Option<_>`) accept a null result.
            None => T::deserialize(serde_json::Value::Null)
                .map(Envelope::Success)
                .map_err(|_| D::Error::custom("successful envelope without a result")),
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Envelope::Success(result) => {
                let mut state = serializer.serialize_struct("Envelope", 2)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("result", result)?;
                state.end()
            }
            Envelope::Failure(message) => {
                let mut state = serializer.serialize_struct("Envelope", 3)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("result", &())?;
                state.serialize_field("error", message)?;
                state.end()
            }
        }
    }
}

// ─── Pagination ──────────────────────────────────────────────────────────────

/// Opaque cursors around a page. An empty cursor means there is no page in
/// that direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub prev_cursor: String,
    #[serde(default)]
    pub next_cursor: String,
}

impl PageInfo {
    pub fn next(&self) -> Option<&str> {
        Some(self.next_cursor.as_str()).filter(|c| !c.is_empty())
    }

    pub fn prev(&self) -> Option<&str> {
        Some(self.prev_cursor.as_str()).filter(|c| !c.is_empty())
    }
}

/// `{"result": [T...], "pageInfo": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub result: Vec<T>,
    #[serde(default)]
    pub page_info: PageInfo,
}

impl<T> PageResponse<T> {
    pub fn has_next(&self) -> bool {
        self.page_info.next().is_some()
    }
}
