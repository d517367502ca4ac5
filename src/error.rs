//! Error types for the YooKassa client
//!
//! Every failed remote call surfaces as [`CheckoutError::RequestFailed`]. The
//! gateway's structured error fields are logged but never exposed: callers get
//! a single human-readable description and a fixed "bad request" class.

use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::error;

/// Message used when a failure carries no gateway description.
pub const DEFAULT_ERROR_MESSAGE: &str = "Ошибка при выполнении запроса";

pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Coarse classification attached to every error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClassification {
    /// Any failed remote call, whatever the transport or status
    BadRequest,
    /// The client could not be constructed
    Configuration,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("{message}")]
    RequestFailed { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl CheckoutError {
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed {
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Map any failed round trip into the uniform request error.
    ///
    /// The message is the gateway's `description` when the failure carries a
    /// recognized error body, otherwise [`DEFAULT_ERROR_MESSAGE`].
    pub fn from_failure(failure: &RequestFailure) -> Self {
        match failure.api_error() {
            Some(body) => {
                error!(
                    "YooKassa API error: status={:?}, code={:?}, id={:?}, parameter={:?}",
                    failure.status(),
                    body.code,
                    body.id,
                    body.parameter
                );
                match body.description.filter(|d| !d.is_empty()) {
                    Some(description) => Self::request_failed(description),
                    None => Self::request_failed(DEFAULT_ERROR_MESSAGE),
                }
            }
            None => {
                error!("YooKassa request failed: {}", failure);
                Self::request_failed(DEFAULT_ERROR_MESSAGE)
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::RequestFailed { message } | Self::Configuration { message } => message,
        }
    }

    pub fn classification(&self) -> ErrorClassification {
        match self {
            Self::RequestFailed { .. } => ErrorClassification::BadRequest,
            Self::Configuration { .. } => ErrorClassification::Configuration,
        }
    }

    /// HTTP status a host would answer with when relaying this error.
    pub fn status_code(&self) -> StatusCode {
        match self.classification() {
            ErrorClassification::BadRequest => StatusCode::BAD_REQUEST,
            ErrorClassification::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::RequestFailed { .. })
    }
}

/// Everything that can go wrong during one round trip, before it is coalesced
/// into [`CheckoutError`].
#[derive(Debug, Error)]
pub enum RequestFailure {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    Normalize(String),
}

impl RequestFailure {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(err) => err.status(),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decode the gateway error body, if this failure has one.
    pub fn api_error(&self) -> Option<ApiErrorBody> {
        match self {
            Self::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

impl From<RequestFailure> for CheckoutError {
    fn from(failure: RequestFailure) -> Self {
        CheckoutError::from_failure(&failure)
    }
}

/// Error body returned by the gateway on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_failure(status: u16, body: &str) -> RequestFailure {
        RequestFailure::Status {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_description_becomes_message() {
        let failure = status_failure(
            400,
            r#"{"type":"error","id":"ab12","code":"invalid_request","description":"Invalid request","parameter":"amount"}"#,
        );
        let err = CheckoutError::from_failure(&failure);
        assert_eq!(err.message(), "Invalid request");
        assert_eq!(err.to_string(), "Invalid request");
        assert_eq!(err.classification(), ErrorClassification::BadRequest);
    }

    #[test]
    fn test_missing_description_falls_back_to_default() {
        let err = CheckoutError::from_failure(&status_failure(404, r#"{"type":"error"}"#));
        assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);

        let err = CheckoutError::from_failure(&status_failure(502, "<html>bad gateway</html>"));
        assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);

        let err = CheckoutError::from_failure(&status_failure(400, r#"{"description":""}"#));
        assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_classification_ignores_status() {
        for status in [401, 403, 404, 429, 500] {
            let err = CheckoutError::from_failure(&status_failure(
                status,
                r#"{"description":"nope"}"#,
            ));
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
            assert!(err.is_request_failure());
        }
    }

    #[test]
    fn test_decode_and_normalize_failures_use_default() {
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CheckoutError = RequestFailure::from(decode).into();
        assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);

        let err: CheckoutError = RequestFailure::Normalize("empty id".to_string()).into();
        assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_configuration_error() {
        let err = CheckoutError::config_error("shop id is required");
        assert_eq!(err.classification(), ErrorClassification::Configuration);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Configuration error: shop id is required");
        assert!(!err.is_request_failure());
    }
}
