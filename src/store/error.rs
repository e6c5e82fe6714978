//! Failure classification for remote store calls.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by a [`RemoteStore`](super::RemoteStore).
///
/// Every transport failure is folded into one of these classes; callers
/// never see a raw transport error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No response was received (connect failure, reset, transport timeout).
    #[error("Network error: {message}")]
    Network { message: String },

    /// The target does not exist on the store.
    #[error("Not found")]
    NotFound,

    /// The store answered with a 5xx status.
    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    /// The store rejected the request (4xx other than 404).
    #[error("Request rejected: {status} - {message}")]
    Validation { status: u16, message: String },

    /// A success response whose body is not a usable item.
    #[error("Invalid response body: {message}")]
    Decode { message: String },
}

impl StoreError {
    /// Classify a non-success HTTP response.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("unknown").to_string()
        } else {
            body.trim().to_string()
        };

        if status == StatusCode::NOT_FOUND {
            StoreError::NotFound
        } else if status.is_server_error() {
            StoreError::Server {
                status: status.as_u16(),
                message,
            }
        } else {
            StoreError::Validation {
                status: status.as_u16(),
                message,
            }
        }
    }

    /// Get error type string for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            StoreError::Network { .. } => "network_error",
            StoreError::NotFound => "not_found",
            StoreError::Server { .. } => "server_error",
            StoreError::Validation { .. } => "validation_error",
            StoreError::Decode { .. } => "decode_error",
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode {
                message: err.to_string(),
            }
        } else {
            StoreError::Network {
                message: err.to_string(),
            }
        }
    }
}
