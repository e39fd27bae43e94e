//! Application error types
//!
//! Top-level error for the worker binary and anything else that wires the
//! layers together.

use std::fmt;
use tmplsync_core::DomainError;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // External service errors
    #[error("External service error: {0}")]
    ExternalService(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Get an error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Whether retrying the same operation later may succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Database(_) | Self::ExternalService(_) => true,
            Self::Domain(e) => e.is_infrastructure(),
            Self::Validation(_) | Self::NotFound(_) | Self::Internal(_) | Self::Config(_) => false,
        }
    }

    /// Create a not found error for a resource type
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tmplsync_core::Snowflake;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::not_found("channel").error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::from(DomainError::ChannelNotFound(Snowflake::new(1))).error_code(),
            "UNKNOWN_CHANNEL"
        );
        assert_eq!(
            AppError::from(ConfigError::MissingVar("DATABASE_URL")).error_code(),
            "CONFIG_ERROR"
        );
    }

    #[test]
    fn test_is_transient() {
        assert!(AppError::Database("connection reset".to_string()).is_transient());
        assert!(AppError::from(DomainError::DatabaseError("timeout".to_string())).is_transient());
        assert!(!AppError::validation("bad locale").is_transient());
        assert!(!AppError::internal(anyhow::anyhow!("boom")).is_transient());
    }

    #[test]
    fn test_display() {
        let err = AppError::from(ConfigError::MissingVar("DATABASE_URL"));
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required environment variable: DATABASE_URL"
        );
    }
}
