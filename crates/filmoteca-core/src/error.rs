//! Error types module
//!
//! All failures in the panel are unified under the `AppError` enum: remote
//! table-store rejections, object-store failures, validation problems, and
//! configuration errors. Errors surfaced to the user are short human-readable
//! strings; no error codes cross the UI boundary.

use std::io;

/// Result alias used throughout the workspace.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Transport failure or server-side rejection from the hosted table store.
    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Remote(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl AppError {
    /// Whether a retry could plausibly succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Remote(_)
                | AppError::Storage(_)
                | AppError::Internal(_)
                | AppError::InternalWithSource { .. }
        )
    }

    /// Client-facing message (may differ from the internal error message).
    pub fn client_message(&self) -> String {
        match self {
            AppError::Remote(msg) => msg.clone(),
            AppError::Storage(msg) => msg.clone(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal error".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_are_recoverable() {
        let err = AppError::Remote("connection reset".to_string());
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "connection reset");
    }

    #[test]
    fn validation_errors_are_not_recoverable() {
        let err = AppError::InvalidInput("title is required".to_string());
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "title is required");
    }

    #[test]
    fn internal_details_stay_internal() {
        let err = AppError::Internal("poisoned lock in pool".to_string());
        assert_eq!(err.client_message(), "Internal error");
    }
}
