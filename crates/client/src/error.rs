use reqwest::StatusCode;
use thiserror::Error;

use finledger_core::ApiErrorBody;

use crate::config::ConfigError;
use crate::storage::StorageError;

pub type ClientResult<T> = Result<T, ClientError>;

/// Failure of a call through the FinLedger client.
///
/// Auth failures (401/403) arrive here *after* the response pipeline has
/// already cleared the session and issued the redirect; callers still have
/// to handle the rejected call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-success status.
    #[error("API error ({status}): {}", api_message(.body, .raw))]
    Api {
        status: StatusCode,
        /// Structured backend error, when the body was one.
        body: Option<ApiErrorBody>,
        /// Raw response body text.
        raw: String,
    },

    /// No response reached the client (connect failure, timeout, ...).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid request url: {0}")]
    Url(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Build an `Api` error from a failed response, keeping the backend's
    /// structured body when it parses.
    pub fn api(status: StatusCode, raw_body: &[u8]) -> Self {
        let raw = String::from_utf8_lossy(raw_body).into_owned();
        let body = serde_json::from_slice::<ApiErrorBody>(raw_body).ok();
        ClientError::Api { status, body, raw }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the backend rejected the session (401) or the permission (403).
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Api { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport(e) if e.is_timeout())
    }

    /// Backend-supplied message, for display by views.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { body: Some(body), .. } => Some(&body.message),
            _ => None,
        }
    }
}

fn api_message<'a>(body: &'a Option<ApiErrorBody>, raw: &'a str) -> &'a str {
    match body {
        Some(body) => &body.message,
        None if raw.is_empty() => "<empty body>",
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_is_kept() {
        let err = ClientError::api(
            StatusCode::BAD_REQUEST,
            br#"{"code":400,"message":"username already exists"}"#,
        );
        assert_eq!(err.backend_message(), Some("username already exists"));
        assert_eq!(err.to_string(), "API error (400 Bad Request): username already exists");
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn unstructured_body_falls_back_to_raw_text() {
        let err = ClientError::api(StatusCode::BAD_GATEWAY, b"upstream down");
        assert_eq!(err.backend_message(), None);
        assert!(err.to_string().ends_with("upstream down"));

        let err = ClientError::api(StatusCode::UNAUTHORIZED, b"");
        assert!(err.is_auth_failure());
        assert!(err.to_string().contains("<empty body>"));
    }

    #[test]
    fn forbidden_counts_as_auth_failure() {
        assert!(ClientError::api(StatusCode::FORBIDDEN, b"").is_auth_failure());
        assert!(!ClientError::api(StatusCode::NOT_FOUND, b"").is_auth_failure());
    }
}
