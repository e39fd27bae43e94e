//! Service context - dependency container for services
//!
//! Holds all repositories, the vendor registry, and other dependencies needed by services.

use std::sync::Arc;

use tmplsync_core::traits::{
    ChannelRepository, HttpLogRepository, IncidentRepository, OrganizationRepository,
    TemplateRepository, TranslationRepository,
};
use tmplsync_core::{Snowflake, SnowflakeGenerator};

use crate::fetch::VendorRegistry;

use super::error::{ServiceError, ServiceResult};

/// Consecutive failed template fetches before an incident is opened
pub const DEFAULT_INCIDENT_THRESHOLD: usize = 5;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories
/// - Vendor fetchers, keyed by channel type
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    org_repo: Arc<dyn OrganizationRepository>,
    channel_repo: Arc<dyn ChannelRepository>,
    template_repo: Arc<dyn TemplateRepository>,
    translation_repo: Arc<dyn TranslationRepository>,
    http_log_repo: Arc<dyn HttpLogRepository>,
    incident_repo: Arc<dyn IncidentRepository>,

    // Vendors
    registry: Arc<VendorRegistry>,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,
    incident_threshold: usize,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        org_repo: Arc<dyn OrganizationRepository>,
        channel_repo: Arc<dyn ChannelRepository>,
        template_repo: Arc<dyn TemplateRepository>,
        translation_repo: Arc<dyn TranslationRepository>,
        http_log_repo: Arc<dyn HttpLogRepository>,
        incident_repo: Arc<dyn IncidentRepository>,
        registry: Arc<VendorRegistry>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        incident_threshold: usize,
    ) -> Self {
        Self {
            org_repo,
            channel_repo,
            template_repo,
            translation_repo,
            http_log_repo,
            incident_repo,
            registry,
            snowflake_generator,
            incident_threshold,
        }
    }

    /// Context where a single store backs every repository
    pub fn from_store<S>(
        store: Arc<S>,
        registry: Arc<VendorRegistry>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self
    where
        S: OrganizationRepository
            + ChannelRepository
            + TemplateRepository
            + TranslationRepository
            + HttpLogRepository
            + IncidentRepository
            + 'static,
    {
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            registry,
            snowflake_generator,
            DEFAULT_INCIDENT_THRESHOLD,
        )
    }

    /// Builder-style incident threshold override
    #[must_use]
    pub fn with_incident_threshold(mut self, threshold: usize) -> Self {
        self.incident_threshold = threshold;
        self
    }

    // === Repositories ===

    /// Get the organization repository
    pub fn org_repo(&self) -> &dyn OrganizationRepository {
        self.org_repo.as_ref()
    }

    /// Get the channel repository
    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    /// Get the template repository
    pub fn template_repo(&self) -> &dyn TemplateRepository {
        self.template_repo.as_ref()
    }

    /// Get the translation repository
    pub fn translation_repo(&self) -> &dyn TranslationRepository {
        self.translation_repo.as_ref()
    }

    /// Get the HTTP log repository
    pub fn http_log_repo(&self) -> &dyn HttpLogRepository {
        self.http_log_repo.as_ref()
    }

    /// Get the incident repository
    pub fn incident_repo(&self) -> &dyn IncidentRepository {
        self.incident_repo.as_ref()
    }

    // === Vendors ===

    /// Get the vendor registry
    pub fn registry(&self) -> &VendorRegistry {
        self.registry.as_ref()
    }

    // === Services ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Consecutive failed fetches before an incident is opened
    pub fn incident_threshold(&self) -> usize {
        self.incident_threshold
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("registry", &self.registry)
            .field("incident_threshold", &self.incident_threshold)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    org_repo: Option<Arc<dyn OrganizationRepository>>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    template_repo: Option<Arc<dyn TemplateRepository>>,
    translation_repo: Option<Arc<dyn TranslationRepository>>,
    http_log_repo: Option<Arc<dyn HttpLogRepository>>,
    incident_repo: Option<Arc<dyn IncidentRepository>>,
    registry: Option<Arc<VendorRegistry>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    incident_threshold: usize,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            org_repo: None,
            channel_repo: None,
            template_repo: None,
            translation_repo: None,
            http_log_repo: None,
            incident_repo: None,
            registry: None,
            snowflake_generator: None,
            incident_threshold: DEFAULT_INCIDENT_THRESHOLD,
        }
    }

    pub fn org_repo(mut self, repo: Arc<dyn OrganizationRepository>) -> Self {
        self.org_repo = Some(repo);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn template_repo(mut self, repo: Arc<dyn TemplateRepository>) -> Self {
        self.template_repo = Some(repo);
        self
    }

    pub fn translation_repo(mut self, repo: Arc<dyn TranslationRepository>) -> Self {
        self.translation_repo = Some(repo);
        self
    }

    pub fn http_log_repo(mut self, repo: Arc<dyn HttpLogRepository>) -> Self {
        self.http_log_repo = Some(repo);
        self
    }

    pub fn incident_repo(mut self, repo: Arc<dyn IncidentRepository>) -> Self {
        self.incident_repo = Some(repo);
        self
    }

    pub fn registry(mut self, registry: Arc<VendorRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn incident_threshold(mut self, threshold: usize) -> Self {
        self.incident_threshold = threshold;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.org_repo.ok_or_else(|| ServiceError::internal("org_repo is required"))?,
            self.channel_repo.ok_or_else(|| ServiceError::internal("channel_repo is required"))?,
            self.template_repo.ok_or_else(|| ServiceError::internal("template_repo is required"))?,
            self.translation_repo.ok_or_else(|| ServiceError::internal("translation_repo is required"))?,
            self.http_log_repo.ok_or_else(|| ServiceError::internal("http_log_repo is required"))?,
            self.incident_repo.ok_or_else(|| ServiceError::internal("incident_repo is required"))?,
            self.registry.unwrap_or_default(),
            self.snowflake_generator.unwrap_or_default(),
            self.incident_threshold,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
