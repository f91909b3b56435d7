//! Error types for the expense API client.
//!
//! # Design
//! `Http` carries the server's `detail` message alone as its `Display`, so a
//! caller surfacing `err.to_string()` shows exactly what the server said
//! (e.g. "Invalid credentials") rather than a wrapper around it. The status
//! code stays available on the variant for callers that branch on it.

use thiserror::Error;

/// Fallback message when a caught failure carries no usable text.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Errors returned by [`ApiClient`](crate::ApiClient) and the resource
/// services built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL (or a path joined against it) is not a valid URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The request never produced a response: DNS failure, connection
    /// refused, or timeout. The message is already normalized.
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-2xx status. `detail` is the server's
    /// own message when the error body parsed, else a status-code fallback.
    #[error("{detail}")]
    Http { status: u16, detail: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// A success envelope arrived with a null `data` field.
    #[error("no data received")]
    NoData,

    /// A 2xx response whose envelope nonetheless reports `status: "error"`.
    /// Carries the envelope's `message` when present.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// The HTTP status code, when this error came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Normalize an arbitrary caught failure into a single message.
///
/// Uses the error's `Display` when non-empty, else [`UNKNOWN_ERROR`]. This
/// is the terminal backstop of the error path and never fails itself.
pub fn error_message(err: &dyn std::error::Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}

/// Extract the error message from a non-2xx response body.
///
/// The server reports failures as a JSON object with a `detail` field; when
/// the body does not parse or the field is absent, fall back to a message
/// carrying the numeric status code.
pub(crate) fn detail_from_body(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| format!("request failed with status {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_field_is_extracted() {
        let msg = detail_from_body(401, r#"{"detail":"Invalid credentials"}"#);
        assert_eq!(msg, "Invalid credentials");
    }

    #[test]
    fn missing_detail_falls_back_to_status() {
        let msg = detail_from_body(500, r#"{"message":"boom"}"#);
        assert_eq!(msg, "request failed with status 500");
    }

    #[test]
    fn unparseable_body_falls_back_to_status() {
        let msg = detail_from_body(502, "<html>Bad Gateway</html>");
        assert_eq!(msg, "request failed with status 502");
    }

    #[test]
    fn http_error_displays_detail_alone() {
        let err = ApiError::Http {
            status: 404,
            detail: "Account not found".to_string(),
        };
        assert_eq!(err.to_string(), "Account not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn error_message_uses_display() {
        let err = ApiError::NoData;
        assert_eq!(error_message(&err), "no data received");
    }

    #[test]
    fn error_message_falls_back_when_empty() {
        #[derive(Debug)]
        struct Silent;
        impl std::fmt::Display for Silent {
            fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                Ok(())
            }
        }
        impl std::error::Error for Silent {}
        assert_eq!(error_message(&Silent), UNKNOWN_ERROR);
    }
}
