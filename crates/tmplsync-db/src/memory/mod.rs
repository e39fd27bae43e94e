//! In-memory store implementing every repository trait
//!
//! Backed by plain maps behind a single lock. Enforces the same uniqueness
//! rules as the PostgreSQL schema, nothing is persisted.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use tmplsync_core::entities::{
    Channel, ChannelType, HttpLog, HttpLogType, Incident, IncidentType, Organization, Template,
    TemplateTranslation,
};
use tmplsync_core::error::DomainError;
use tmplsync_core::traits::{
    ChannelRepository, HttpLogRepository, IncidentRepository, OrganizationRepository, RepoResult,
    TemplateRepository, TranslationRepository,
};
use tmplsync_core::value_objects::Snowflake;

#[derive(Default)]
struct Tables {
    organizations: BTreeMap<Snowflake, Organization>,
    channels: BTreeMap<Snowflake, Channel>,
    templates: BTreeMap<Snowflake, Template>,
    translations: BTreeMap<Snowflake, TemplateTranslation>,
    http_logs: Vec<HttpLog>,
    incidents: BTreeMap<Snowflake, Incident>,
}

/// In-memory store for tests and local runs
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every translation of a channel, active or not, ordered by ID
    pub fn translations_for_channel(&self, channel_id: Snowflake) -> Vec<TemplateTranslation> {
        self.tables
            .read()
            .translations
            .values()
            .filter(|t| t.channel_id == channel_id)
            .cloned()
            .collect()
    }

    /// Every incident of a channel, ordered by ID
    pub fn incidents_for_channel(&self, channel_id: Snowflake) -> Vec<Incident> {
        self.tables
            .read()
            .incidents
            .values()
            .filter(|i| i.channel_id == channel_id)
            .cloned()
            .collect()
    }

    /// Every HTTP log of a channel in insertion order
    pub fn http_logs_for_channel(&self, channel_id: Snowflake) -> Vec<HttpLog> {
        self.tables
            .read()
            .http_logs
            .iter()
            .filter(|l| l.channel_id == channel_id)
            .cloned()
            .collect()
    }

    /// Number of templates owned by an organization
    pub fn template_count(&self, org_id: Snowflake) -> usize {
        self.tables
            .read()
            .templates
            .values()
            .filter(|t| t.org_id == org_id)
            .count()
    }
}

#[async_trait]
impl OrganizationRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Organization>> {
        Ok(self.tables.read().organizations.get(&id).cloned())
    }

    async fn create(&self, org: &Organization) -> RepoResult<()> {
        self.tables.write().organizations.insert(org.id, org.clone());
        Ok(())
    }
}

#[async_trait]
impl ChannelRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        Ok(self.tables.read().channels.get(&id).cloned())
    }

    async fn find_syncable_by_types(&self, types: &[ChannelType]) -> RepoResult<Vec<Channel>> {
        let tables = self.tables.read();
        Ok(tables
            .channels
            .values()
            .filter(|c| c.is_active && types.contains(&c.channel_type))
            .filter(|c| {
                tables
                    .organizations
                    .get(&c.org_id)
                    .is_some_and(Organization::is_syncable)
            })
            .cloned()
            .collect())
    }

    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        self.tables.write().channels.insert(channel.id, channel.clone());
        Ok(())
    }
}

#[async_trait]
impl TemplateRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Template>> {
        Ok(self.tables.read().templates.get(&id).cloned())
    }

    async fn find_by_org_name(&self, org_id: Snowflake, name: &str) -> RepoResult<Option<Template>> {
        Ok(self
            .tables
            .read()
            .templates
            .values()
            .find(|t| t.org_id == org_id && t.name == name)
            .cloned())
    }

    async fn find_by_org(&self, org_id: Snowflake) -> RepoResult<Vec<Template>> {
        let mut templates: Vec<Template> = self
            .tables
            .read()
            .templates
            .values()
            .filter(|t| t.org_id == org_id)
            .cloned()
            .collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(templates)
    }

    async fn create(&self, template: &Template) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if tables
            .templates
            .values()
            .any(|t| t.org_id == template.org_id && t.name == template.name)
        {
            return Err(DomainError::TemplateAlreadyExists(template.name.clone()));
        }
        tables.templates.insert(template.id, template.clone());
        Ok(())
    }
}

#[async_trait]
impl TranslationRepository for MemoryStore {
    async fn find_active_by_external_id(
        &self,
        channel_id: Snowflake,
        external_id: &str,
    ) -> RepoResult<Option<TemplateTranslation>> {
        Ok(self
            .tables
            .read()
            .translations
            .values()
            .find(|t| t.is_active && t.channel_id == channel_id && t.external_id == external_id)
            .cloned())
    }

    async fn find_active_by_channel(&self, channel_id: Snowflake) -> RepoResult<Vec<TemplateTranslation>> {
        let mut translations: Vec<TemplateTranslation> = self
            .tables
            .read()
            .translations
            .values()
            .filter(|t| t.is_active && t.channel_id == channel_id)
            .cloned()
            .collect();
        translations.sort_by(|a, b| {
            a.template_id
                .cmp(&b.template_id)
                .then_with(|| a.locale.cmp(&b.locale))
        });
        Ok(translations)
    }

    async fn find_active_by_org(&self, org_id: Snowflake) -> RepoResult<Vec<TemplateTranslation>> {
        let tables = self.tables.read();
        let mut translations: Vec<TemplateTranslation> = tables
            .translations
            .values()
            .filter(|t| t.is_active)
            .filter(|t| {
                tables
                    .channels
                    .get(&t.channel_id)
                    .is_some_and(|c| c.is_active && c.org_id == org_id)
            })
            .cloned()
            .collect();
        translations.sort_by(|a, b| {
            a.channel_id
                .cmp(&b.channel_id)
                .then_with(|| a.locale.cmp(&b.locale))
                .then(a.id.cmp(&b.id))
        });
        Ok(translations)
    }

    async fn replace(
        &self,
        previous: Option<Snowflake>,
        translation: &TemplateTranslation,
        modified_on: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut tables = self.tables.write();

        // check everything before the first write so a failure changes nothing
        if let Some(previous) = previous {
            if !tables.translations.get(&previous).is_some_and(|t| t.is_active) {
                return Err(DomainError::TranslationNotFound(previous));
            }
        }
        if !tables.templates.contains_key(&translation.template_id) {
            return Err(DomainError::TemplateNotFound(translation.template_id));
        }
        let same_locale = |t: &TemplateTranslation| {
            t.channel_id == translation.channel_id
                && t.template_id == translation.template_id
                && t.locale == translation.locale
        };
        if tables.translations.values().any(|t| {
            t.is_active
                && Some(t.id) != previous
                && !same_locale(t)
                && t.channel_id == translation.channel_id
                && t.external_id == translation.external_id
        }) {
            return Err(DomainError::ActiveTranslationExists(
                translation.external_id.clone(),
            ));
        }

        for t in tables
            .translations
            .values_mut()
            .filter(|t| t.is_active && (Some(t.id) == previous || same_locale(t)))
        {
            t.is_active = false;
        }
        tables.translations.insert(translation.id, translation.clone());
        if let Some(template) = tables.templates.get_mut(&translation.template_id) {
            template.modified_on = modified_on;
        }
        Ok(())
    }

    async fn deactivate_except(&self, channel_id: Snowflake, keep: &[Snowflake]) -> RepoResult<u64> {
        let mut tables = self.tables.write();
        let mut count = 0;
        for t in tables
            .translations
            .values_mut()
            .filter(|t| t.is_active && t.channel_id == channel_id && !keep.contains(&t.id))
        {
            t.is_active = false;
            count += 1;
        }
        Ok(count)
    }
}

#[async_trait]
impl HttpLogRepository for MemoryStore {
    async fn create(&self, log: &HttpLog) -> RepoResult<()> {
        self.tables.write().http_logs.push(log.clone());
        Ok(())
    }

    async fn recent_for_channel(
        &self,
        channel_id: Snowflake,
        log_type: HttpLogType,
        limit: i64,
    ) -> RepoResult<Vec<HttpLog>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .tables
            .read()
            .http_logs
            .iter()
            .rev()
            .filter(|l| l.channel_id == channel_id && l.log_type == log_type)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl IncidentRepository for MemoryStore {
    async fn find_open(
        &self,
        channel_id: Snowflake,
        incident_type: IncidentType,
    ) -> RepoResult<Option<Incident>> {
        Ok(self
            .tables
            .read()
            .incidents
            .values()
            .find(|i| i.is_open() && i.channel_id == channel_id && i.incident_type == incident_type)
            .cloned())
    }

    async fn create(&self, incident: &Incident) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if incident.is_open()
            && tables.incidents.values().any(|i| {
                i.is_open()
                    && i.channel_id == incident.channel_id
                    && i.incident_type == incident.incident_type
            })
        {
            return Err(DomainError::IncidentAlreadyOpen(incident.channel_id));
        }
        tables.incidents.insert(incident.id, incident.clone());
        Ok(())
    }

    async fn end(&self, id: Snowflake, ended_on: DateTime<Utc>) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let incident = tables
            .incidents
            .get_mut(&id)
            .filter(|i| i.is_open())
            .ok_or(DomainError::IncidentNotFound(id))?;
        incident.ended_on = Some(ended_on);
        Ok(())
    }
}
