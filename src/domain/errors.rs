//! Domain error types
//!
//! This module defines the error hierarchy for glporter. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main glporter error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum PorterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// GitLab API errors
    #[error("GitLab error: {0}")]
    GitLab(#[from] GitLabError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation was interrupted by a shutdown signal
    #[error("Operation cancelled by shutdown signal")]
    Cancelled,

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// GitLab API errors
///
/// Every variant that originates from an HTTP exchange carries the status
/// code and the raw response body verbatim.
#[derive(Debug, Error)]
pub enum GitLabError {
    /// Connectivity, TLS or timeout failure. Never retried.
    #[error("Failed to reach GitLab: {0}")]
    ConnectionFailed(String),

    /// Non-2xx reply to a submit or listing request
    #[error("{operation} rejected by API with status {status}: {body}")]
    Rejected {
        operation: String,
        status: u16,
        body: String,
    },

    /// Too many consecutive polls without legible progress
    #[error("{operation} stalled after {attempts} polls without progress (last status {status}): {body}")]
    StallLimitReached {
        operation: String,
        attempts: u32,
        status: u16,
        body: String,
    },

    /// The remote operation reached a terminal failure state
    #[error("{operation} failed: {reason} (status {status}): {body}")]
    OperationFailed {
        operation: String,
        reason: String,
        status: u16,
        body: String,
    },

    /// Polling ran past the configured wait limit
    #[error("{operation} still running after {waited_secs}s, giving up")]
    DeadlineExceeded { operation: String, waited_secs: u64 },
}

impl GitLabError {
    /// HTTP status attached to the error, when there is one
    pub fn status(&self) -> Option<u16> {
        match self {
            GitLabError::Rejected { status, .. }
            | GitLabError::StallLimitReached { status, .. }
            | GitLabError::OperationFailed { status, .. } => Some(*status),
            GitLabError::ConnectionFailed(_) | GitLabError::DeadlineExceeded { .. } => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PorterError {
    fn from(err: std::io::Error) -> Self {
        PorterError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PorterError {
    fn from(err: serde_json::Error) -> Self {
        PorterError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PorterError {
    fn from(err: toml::de::Error) -> Self {
        PorterError::Configuration(format!("TOML parse error: {err}"))
    }
}
