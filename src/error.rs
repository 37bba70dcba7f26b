//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    /// The request for `operation` failed below the envelope: network,
    /// HTTP status, or body decoding.
    #[error("{operation} failed: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: HttpError,
    },

    /// The venue answered with a well-formed envelope carrying `success: false`.
    #[error("{operation} was not successful: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SdkError {
    pub(crate) fn request(operation: &'static str) -> impl FnOnce(HttpError) -> SdkError {
        move |source| SdkError::Request { operation, source }
    }

    /// The underlying HTTP-layer error, if this failure came from the transport.
    pub fn http(&self) -> Option<&HttpError> {
        match self {
            SdkError::Request { source, .. } => Some(source),
            _ => None,
        }
    }

    /// HTTP status code of a non-success response, if any.
    pub fn status(&self) -> Option<u16> {
        self.http().and_then(HttpError::status)
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    /// Network or connection failure. Never retried.
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any status outside the accepted success set. `message` is the
    /// structured `error` field when the body could be decoded.
    #[error("response: status={status}, body={body}")]
    Status {
        status: u16,
        body: String,
        message: Option<String>,
    },

    /// The body was expected to be JSON and was not.
    #[error("failed to decode response body. Input: {body}, err: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// Success status with a zero-length body.
    #[error("response body is empty")]
    EmptyResponseBody,

    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The caller's cancellation fired before the request completed.
    #[error("request cancelled")]
    Cancelled,

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl HttpError {
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_empty_response(&self) -> bool {
        matches!(self, HttpError::EmptyResponseBody)
    }

    /// Structured error message recovered from a non-success body.
    pub fn message(&self) -> Option<&str> {
        match self {
            HttpError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display_carries_code_and_body() {
        let err = HttpError::Status {
            status: 404,
            body: r#"{"success":false,"result":null,"error":"not found"}"#.to_string(),
            message: Some("not found".to_string()),
        };
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("not found"));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.message(), Some("not found"));
    }

    #[test]
    fn test_sdk_error_wraps_operation() {
        let err = SdkError::request("get spot order")(HttpError::EmptyResponseBody);
        assert_eq!(err.to_string(), "get spot order failed: response body is empty");
        assert!(err.http().is_some_and(HttpError::is_empty_response));
        assert_eq!(err.status(), None);
    }
}
