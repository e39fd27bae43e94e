//! Template service
//!
//! Read side of the synced templates.

use std::collections::HashMap;

use tracing::instrument;

use tmplsync_core::{Snowflake, TemplateTranslation};

use crate::dto::{TemplateResponse, TemplateWithTranslations};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Template service
pub struct TemplateService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TemplateService<'a> {
    /// Create a new TemplateService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// An organization's templates that have at least one active translation
    /// on an active channel, ordered by name
    #[instrument(skip(self))]
    pub async fn list_for_org(&self, org_id: Snowflake) -> ServiceResult<Vec<TemplateResponse>> {
        self.ctx
            .org_repo()
            .find_by_id(org_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Organization", org_id.to_string()))?;

        let templates = self.ctx.template_repo().find_by_org(org_id).await?;

        // already ordered by channel then locale
        let mut by_template: HashMap<Snowflake, Vec<TemplateTranslation>> = HashMap::new();
        for translation in self.ctx.translation_repo().find_active_by_org(org_id).await? {
            by_template
                .entry(translation.template_id)
                .or_default()
                .push(translation);
        }

        Ok(templates
            .into_iter()
            .filter_map(|template| {
                let translations = by_template.remove(&template.id)?;
                Some(TemplateWithTranslations { template, translations }.into())
            })
            .collect())
    }
}
