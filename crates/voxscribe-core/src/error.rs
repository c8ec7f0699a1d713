//! Error taxonomy for backend exchanges.
//!
//! Every failure a screen can see falls into one of four buckets:
//! backend-reported messages (surfaced verbatim), transport failures
//! (network error, timeout), malformed success responses, and non-2xx
//! statuses without a readable error payload.

use serde::Deserialize;

/// Errors produced while talking to the VoxScribe backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed: connect failure, timeout, TLS error.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with an `{error}` payload; message verbatim.
    #[error("{0}")]
    Backend(String),

    /// The backend answered 2xx but the body did not match the contract.
    #[error("unexpected response from server: {0}")]
    InvalidResponse(String),

    /// Non-2xx status without a parseable error payload.
    #[error("server returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Error body the backend sends alongside non-2xx statuses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// Map a non-success response to `Backend` when the body carries an
    /// `{error}` message, otherwise to `Status`.
    pub(crate) fn from_failure(status: reqwest::StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => ApiError::Backend(parsed.error),
            Err(_) => ApiError::Status(status),
        }
    }
}

/// Truncate a response body for inclusion in an error message.
pub(crate) fn body_snippet(body: &str) -> String {
    const MAX: usize = 120;
    let trimmed = body.trim();
    if trimmed.len() <= MAX {
        trimmed.to_string()
    } else {
        let mut end = MAX;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &trimmed[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_payload_surfaced_verbatim() {
        let err = ApiError::from_failure(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"error":"Invalid credentials"}"#,
        );
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_unreadable_error_body_maps_to_status() {
        let err = ApiError::from_failure(reqwest::StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert!(matches!(err, ApiError::Status(s) if s == reqwest::StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn test_body_snippet_truncates_long_bodies() {
        let long = "x".repeat(500);
        let snippet = body_snippet(&long);
        assert!(snippet.len() < 130);
        assert!(snippet.ends_with("..."));
    }
}
