//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use tmplsync_common::AppError;
use tmplsync_core::DomainError;
use std::fmt;

use crate::fetch::FetchError;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or storage failure
    Domain(DomainError),

    /// Vendor request failure
    Fetch(FetchError),

    /// Application error (config, etc.)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Fetch(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Fetch(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the failure came from a vendor that may answer next time
    pub fn is_transient_fetch(&self) -> bool {
        matches!(self, Self::Fetch(e) if e.is_transient())
    }

    /// Get the error code for logs
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Fetch(FetchError::Domain(e)) => e.code(),
            Self::Fetch(_) => "VENDOR_ERROR",
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<FetchError> for ServiceError {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) | ServiceError::Fetch(FetchError::Domain(e)) => AppError::Domain(e),
            ServiceError::Fetch(e) => AppError::ExternalService(e.to_string()),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => AppError::NotFound(format!("{resource} {id}")),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tmplsync_core::Snowflake;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Organization", "123");
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("Organization not found: 123"));
    }

    #[test]
    fn test_transient_fetch() {
        let err = ServiceError::from(FetchError::Status {
            url: "https://example.com".into(),
            status: 500,
        });
        assert!(err.is_transient_fetch());
        assert_eq!(err.error_code(), "VENDOR_ERROR");

        let err = ServiceError::from(FetchError::Domain(DomainError::MissingChannelConfig {
            channel_id: Snowflake::new(1),
            key: "auth_token".into(),
        }));
        assert!(!err.is_transient_fetch());
        assert_eq!(err.error_code(), "MISSING_CHANNEL_CONFIG");
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::not_found("Template", "456").into();
        assert_eq!(app_err.error_code(), "NOT_FOUND");

        let app_err: AppError = ServiceError::from(FetchError::VendorFailure {
            url: "https://example.com".into(),
        })
        .into();
        assert!(app_err.is_transient());
    }
}
