//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; `tmplsync-db` provides PostgreSQL
//! and in-memory implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Channel, ChannelType, HttpLog, HttpLogType, Incident, IncidentType, Organization, Template,
    TemplateTranslation,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Organization Repository
// ============================================================================

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Find organization by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Organization>>;

    /// Create a new organization
    async fn create(&self, org: &Organization) -> RepoResult<()>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find channel by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>>;

    /// Active channels of the given types on active, non-suspended organizations,
    /// ordered by ID
    async fn find_syncable_by_types(&self, types: &[ChannelType]) -> RepoResult<Vec<Channel>>;

    /// Create a new channel
    async fn create(&self, channel: &Channel) -> RepoResult<()>;
}

// ============================================================================
// Template Repository
// ============================================================================

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Find template by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Template>>;

    /// Find template by organization and name
    async fn find_by_org_name(&self, org_id: Snowflake, name: &str) -> RepoResult<Option<Template>>;

    /// List an organization's templates ordered by name
    async fn find_by_org(&self, org_id: Snowflake) -> RepoResult<Vec<Template>>;

    /// Create a new template
    async fn create(&self, template: &Template) -> RepoResult<()>;
}

// ============================================================================
// Translation Repository
// ============================================================================

#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Find the active translation of a channel with the given external ID
    async fn find_active_by_external_id(
        &self,
        channel_id: Snowflake,
        external_id: &str,
    ) -> RepoResult<Option<TemplateTranslation>>;

    /// List a channel's active translations
    async fn find_active_by_channel(&self, channel_id: Snowflake) -> RepoResult<Vec<TemplateTranslation>>;

    /// List active translations on an organization's active channels, ordered
    /// by channel then locale
    async fn find_active_by_org(&self, org_id: Snowflake) -> RepoResult<Vec<TemplateTranslation>>;

    /// Make `translation` the active row for its external ID and locale
    ///
    /// Deactivates `previous` and any other active row for the same
    /// (channel, template, locale), inserts `translation` and sets the
    /// template's `modified_on`. Either all of it happens or none of it.
    async fn replace(
        &self,
        previous: Option<Snowflake>,
        translation: &TemplateTranslation,
        modified_on: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Deactivate a channel's active translations not in `keep`, returning
    /// how many changed
    async fn deactivate_except(&self, channel_id: Snowflake, keep: &[Snowflake]) -> RepoResult<u64>;
}

// ============================================================================
// HTTP Log Repository
// ============================================================================

#[async_trait]
pub trait HttpLogRepository: Send + Sync {
    /// Append a log entry
    async fn create(&self, log: &HttpLog) -> RepoResult<()>;

    /// Newest entries of a type for a channel, newest first
    async fn recent_for_channel(
        &self,
        channel_id: Snowflake,
        log_type: HttpLogType,
        limit: i64,
    ) -> RepoResult<Vec<HttpLog>>;
}

// ============================================================================
// Incident Repository
// ============================================================================

#[async_trait]
pub trait IncidentRepository: Send + Sync {
    /// Find the open incident of a type for a channel
    async fn find_open(
        &self,
        channel_id: Snowflake,
        incident_type: IncidentType,
    ) -> RepoResult<Option<Incident>>;

    /// Create a new incident
    async fn create(&self, incident: &Incident) -> RepoResult<()>;

    /// Mark an incident as ended
    async fn end(&self, id: Snowflake, ended_on: DateTime<Utc>) -> RepoResult<()>;
}
