//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Organization not found: {0}")]
    OrganizationNotFound(Snowflake),

    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    #[error("Template not found: {0}")]
    TemplateNotFound(Snowflake),

    #[error("Template translation not found: {0}")]
    TranslationNotFound(Snowflake),

    #[error("Incident not found: {0}")]
    IncidentNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Channel {channel_id} is missing config: {key}")]
    MissingChannelConfig { channel_id: Snowflake, key: String },

    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Template already exists: {0}")]
    TemplateAlreadyExists(String),

    #[error("Active translation already exists for external id: {0}")]
    ActiveTranslationExists(String),

    #[error("Channel {0} already has an open incident")]
    IncidentAlreadyOpen(Snowflake),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs and responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::OrganizationNotFound(_) => "UNKNOWN_ORGANIZATION",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::TemplateNotFound(_) => "UNKNOWN_TEMPLATE",
            Self::TranslationNotFound(_) => "UNKNOWN_TRANSLATION",
            Self::IncidentNotFound(_) => "UNKNOWN_INCIDENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MissingChannelConfig { .. } => "MISSING_CHANNEL_CONFIG",
            Self::InvalidLocale(_) => "INVALID_LOCALE",

            // Conflict
            Self::TemplateAlreadyExists(_) => "TEMPLATE_ALREADY_EXISTS",
            Self::ActiveTranslationExists(_) => "ACTIVE_TRANSLATION_EXISTS",
            Self::IncidentAlreadyOpen(_) => "INCIDENT_ALREADY_OPEN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::OrganizationNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::TemplateNotFound(_)
                | Self::TranslationNotFound(_)
                | Self::IncidentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::MissingChannelConfig { .. } | Self::InvalidLocale(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::TemplateAlreadyExists(_)
                | Self::ActiveTranslationExists(_)
                | Self::IncidentAlreadyOpen(_)
        )
    }

    /// Check if this came from the storage layer
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::InternalError(_))
    }
}
