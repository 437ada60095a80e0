// SPDX-License-Identifier: MIT

//! Typed error handling for workbench-sync
//!
//! One enum per concern, with `SyncError` at the top so callers that drive
//! several concerns at once can use `?` across all of them.

use thiserror::Error;

use crate::workbench::workflows::types::WorkflowId;

/// Top-level error type for workbench-sync
#[derive(Debug, Error)]
pub enum SyncError {
    /// Errors from the workbench HTTP API
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The event store rejected or could not accept an event
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Share-modal errors
    #[error("Share error: {0}")]
    Share(#[from] ShareError),

    /// Configuration errors (missing env vars, invalid URLs)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Scenario files that reference undefined steps or replay out of order
    #[error("Scenario error: {0}")]
    Scenario(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors raised while reducing an event
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A reducer refused the event; the state is left unchanged
    #[error(transparent)]
    Edit(#[from] EditError),

    /// The store task has shut down and can no longer accept events
    #[error("Store is closed")]
    Closed,
}

/// Edit-tracker logic errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    /// `end` arrived for a workflow with nothing in flight
    #[error("No pending edit for workflow {id}")]
    NoPendingEdit { id: WorkflowId },

    /// `end` arrived for a ticket that was never begun or has already ended
    #[error("Edit {seq} on workflow {id} is not in flight")]
    UnknownTicket { id: WorkflowId, seq: u64 },
}

/// Errors from the workbench API collaborator
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// Transport-level failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Endpoint URL could not be built
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Mock or alternate implementations report failures through this
    #[error("{0}")]
    Other(String),
}

/// Share-modal input errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShareError {
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),
}

impl SyncError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl ApiError {
    /// Create a status error
    pub fn status(status: u16, url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create from a generic message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

impl From<&str> for ApiError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<String> for ApiError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}
