//! Centralized error types for trackmirror.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Tracker(e) => e.user_message(),
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to reach the sync server. Is it running?"
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}

/// Errors reported by the import/sync server itself.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    #[error("No mapping for issue: {0}")]
    NotMapped(String),

    #[error("Server rejected request: {status} - {message}")]
    Rejected { status: u16, message: String },
}

impl TrackerError {
    pub fn user_message(&self) -> &'static str {
        match self {
            TrackerError::IssueNotFound(_) => {
                "The issue is no longer cached on the server. Reload the issue list."
            }
            TrackerError::NotMapped(_) => "This issue has not been imported yet.",
            TrackerError::Rejected { status, .. } if *status >= 500 => {
                "The sync server failed to process the request."
            }
            TrackerError::Rejected { .. } => "The sync server rejected the request.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = vec![
            AppError::Network(NetworkError::Timeout),
            AppError::Network(NetworkError::ConnectionFailed("refused".into())),
            AppError::Config(ConfigError::Invalid("test".into())),
            AppError::Tracker(TrackerError::IssueNotFound("7".into())),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "empty message for {err}");
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let err = TrackerError::NotMapped("42".into());
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Tracker(TrackerError::NotMapped(_))));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Tracker(TrackerError::Rejected {
            status: 503,
            message: "down".into(),
        });
        assert_eq!(
            app_err.user_message(),
            "The sync server failed to process the request."
        );
        let app_err = AppError::Tracker(TrackerError::Rejected {
            status: 400,
            message: "bad".into(),
        });
        assert_eq!(app_err.user_message(), "The sync server rejected the request.");
    }
}
