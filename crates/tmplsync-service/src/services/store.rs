//! Template store
//!
//! Reconciles the templates a vendor reports for a channel with the stored
//! translations. Translations are never updated in place: a change
//! deactivates the current row and inserts a new active one. Callers must
//! not reconcile the same channel concurrently.

use std::collections::HashSet;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, instrument};

use tmplsync_core::{
    config_keys, normalize_template, Channel, DomainError, NormalizedTemplate, Snowflake,
    Template, TemplateTranslation, TranslationDraft, VendorProfile,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// What one reconciliation pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Entries stored or confirmed unchanged
    pub stored: usize,
    /// Entries dropped because of their status, language or shape, or
    /// superseded by a later entry
    pub skipped: usize,
    /// Active translations that the vendor no longer reports
    pub deactivated: u64,
}

/// Template store
pub struct TemplateStore<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TemplateStore<'a> {
    /// Create a new TemplateStore
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get an organization's template by name, creating it if missing
    #[instrument(skip(self))]
    pub async fn get_or_create_template(&self, org_id: Snowflake, name: &str) -> ServiceResult<Template> {
        let repo = self.ctx.template_repo();
        if let Some(template) = repo.find_by_org_name(org_id, name).await? {
            return Ok(template);
        }

        let template = Template::new(self.ctx.generate_id(), org_id, name);
        match repo.create(&template).await {
            Ok(()) => {
                info!(org_id = %org_id, template_id = %template.id, name = %name, "Template created");
                Ok(template)
            }
            // created by someone else since the lookup
            Err(err) if err.is_conflict() => repo
                .find_by_org_name(org_id, name)
                .await?
                .ok_or_else(|| ServiceError::not_found("Template", name)),
            Err(err) => Err(err.into()),
        }
    }

    /// Store a translation of template `name` on a channel
    ///
    /// Returns the active row matching `draft`: the existing one when nothing
    /// changed, otherwise a newly inserted one.
    #[instrument(skip(self, channel, draft), fields(channel_id = %channel.id, external_id = %draft.external_id))]
    pub async fn get_or_create(
        &self,
        channel: &Channel,
        name: &str,
        draft: TranslationDraft,
    ) -> ServiceResult<TemplateTranslation> {
        let translations = self.ctx.translation_repo();

        let existing = translations
            .find_active_by_external_id(channel.id, &draft.external_id)
            .await?;
        let mut template = self.get_or_create_template(channel.org_id, name).await?;

        let previous = match existing {
            Some(existing) if existing.matches_draft(template.id, &draft) => return Ok(existing),
            Some(existing) => Some(existing.id),
            None => None,
        };

        let translation =
            TemplateTranslation::from_draft(self.ctx.generate_id(), template.id, channel.id, draft);
        template.touch(Utc::now());
        translations
            .replace(previous, &translation, template.modified_on)
            .await?;

        info!(
            translation_id = %translation.id,
            template = %name,
            locale = %translation.locale,
            status = %translation.status,
            "Template translation stored"
        );

        Ok(translation)
    }

    /// Deactivate a channel's active translations not in `keep`
    #[instrument(skip(self, channel, keep), fields(channel_id = %channel.id))]
    pub async fn trim(&self, channel: &Channel, keep: &[Snowflake]) -> ServiceResult<u64> {
        let count = self
            .ctx
            .translation_repo()
            .deactivate_except(channel.id, keep)
            .await?;
        if count > 0 {
            info!(count, "Deactivated translations no longer reported by the vendor");
        }
        Ok(count)
    }

    /// Reconcile a channel's stored translations with the vendor's raw list
    #[instrument(skip(self, channel, raw_templates), fields(channel_id = %channel.id, count = raw_templates.len()))]
    pub async fn update_local_templates(
        &self,
        channel: &Channel,
        raw_templates: &[Value],
    ) -> ServiceResult<UpdateSummary> {
        let profile = VendorProfile::for_channel_type(&channel.channel_type).ok_or_else(|| {
            DomainError::ValidationError(format!(
                "channel type {} has no templates",
                channel.channel_type
            ))
        })?;
        let namespace = channel.config_str(config_keys::FB_NAMESPACE).unwrap_or_default();

        let mut summary = UpdateSummary::default();
        let mut entries = Vec::with_capacity(raw_templates.len());

        for raw in raw_templates {
            let Some(parsed) = profile.parse(raw) else {
                debug!("Skipping template without name or language");
                summary.skipped += 1;
                continue;
            };

            match normalize_template(&profile, &parsed, namespace) {
                Ok(normalized) => entries.push(normalized),
                Err(reason) => {
                    debug!(name = %parsed.name, language = %parsed.language, %reason, "Skipping template");
                    summary.skipped += 1;
                }
            }
        }

        let normalized_count = entries.len();
        let entries = latest_entries(entries);
        summary.skipped += normalized_count - entries.len();

        let mut keep = Vec::with_capacity(entries.len());
        for normalized in entries {
            let translation = self
                .get_or_create(channel, &normalized.name, normalized.draft)
                .await?;
            keep.push(translation.id);
            summary.stored += 1;
        }

        summary.deactivated = self.trim(channel, &keep).await?;
        Ok(summary)
    }
}

/// Drop entries superseded by a later one for the same template and locale
/// or the same external ID, keeping list order
///
/// A channel holds one active translation per template and locale and one
/// per external ID.
fn latest_entries(entries: Vec<NormalizedTemplate>) -> Vec<NormalizedTemplate> {
    let mut locales = HashSet::new();
    let mut external_ids = HashSet::new();
    let mut kept: Vec<NormalizedTemplate> = entries
        .into_iter()
        .rev()
        .filter(|entry| {
            let locale_key = (entry.name.clone(), entry.draft.locale.clone());
            if locales.contains(&locale_key) || external_ids.contains(&entry.draft.external_id) {
                debug!(
                    name = %entry.name,
                    external_id = %entry.draft.external_id,
                    "Skipping template superseded by a later entry"
                );
                return false;
            }
            locales.insert(locale_key);
            external_ids.insert(entry.draft.external_id.clone());
            true
        })
        .collect();
    kept.reverse();
    kept
}
