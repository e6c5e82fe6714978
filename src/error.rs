//! Errors surfaced to the presentation layer.

use thiserror::Error;

use crate::item::{ItemId, PendingOperation};
use crate::store::StoreError;

/// Failure of a list command.
///
/// Every variant leaves the collection in a previously valid state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Input rejected before any I/O (blank text), or by the store (4xx).
    #[error("{message}")]
    Validation { message: String },

    /// The store handed out an identity that another item already holds.
    #[error("Duplicate identity '{id}'")]
    Conflict { id: ItemId },

    /// The target item no longer exists.
    #[error("Item '{id}' not found")]
    NotFound { id: ItemId },

    /// The store could not be reached.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The store failed (5xx or unusable response).
    #[error("Server error: {message}")]
    Server { status: Option<u16>, message: String },

    /// Another operation on the same item has not resolved yet.
    #[error("Item '{id}' has a pending {operation}")]
    Pending {
        id: ItemId,
        operation: PendingOperation,
    },

    /// A positional reference that does not match a rendered row.
    #[error("No item at position {index}")]
    IndexOutOfRange { index: usize },
}

impl SyncError {
    pub fn validation(message: impl Into<String>) -> Self {
        SyncError::Validation {
            message: message.into(),
        }
    }

    /// Classify a store failure for an operation targeting `id`.
    pub fn from_store(err: StoreError, id: &ItemId) -> Self {
        match err {
            StoreError::NotFound => SyncError::NotFound { id: id.clone() },
            other => other.into(),
        }
    }

    /// Get error type string for logs and display.
    pub fn error_type(&self) -> &'static str {
        match self {
            SyncError::Validation { .. } => "validation_error",
            SyncError::Conflict { .. } => "conflict_error",
            SyncError::NotFound { .. } => "not_found",
            SyncError::Network { .. } => "network_error",
            SyncError::Server { .. } => "server_error",
            SyncError::Pending { .. } => "pending",
            SyncError::IndexOutOfRange { .. } => "index_out_of_range",
        }
    }
}

/// Conversion for calls with no single target item (list, create).
/// A 404 there means the endpoint itself is missing.
impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Network { message } => SyncError::Network { message },
            StoreError::NotFound => SyncError::Server {
                status: Some(404),
                message: "Items endpoint not found".to_string(),
            },
            StoreError::Server { status, message } => SyncError::Server {
                status: Some(status),
                message,
            },
            StoreError::Validation { status, message } => SyncError::Validation {
                message: format!("Rejected by store ({}): {}", status, message),
            },
            StoreError::Decode { message } => SyncError::Server {
                status: None,
                message,
            },
        }
    }
}
