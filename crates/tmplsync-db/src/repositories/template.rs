//! PostgreSQL implementation of TemplateRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tmplsync_core::entities::Template;
use tmplsync_core::error::DomainError;
use tmplsync_core::traits::{RepoResult, TemplateRepository};
use tmplsync_core::value_objects::Snowflake;

use crate::models::TemplateModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of TemplateRepository
#[derive(Clone)]
pub struct PgTemplateRepository {
    pool: PgPool,
}

impl PgTemplateRepository {
    /// Create a new PgTemplateRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for PgTemplateRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Template>> {
        let result = sqlx::query_as::<_, TemplateModel>(
            r"
            SELECT id, uuid, org_id, name, created_on, modified_on
            FROM templates
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Template::from))
    }

    #[instrument(skip(self))]
    async fn find_by_org_name(&self, org_id: Snowflake, name: &str) -> RepoResult<Option<Template>> {
        let result = sqlx::query_as::<_, TemplateModel>(
            r"
            SELECT id, uuid, org_id, name, created_on, modified_on
            FROM templates
            WHERE org_id = $1 AND name = $2
            ",
        )
        .bind(org_id.into_inner())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Template::from))
    }

    #[instrument(skip(self))]
    async fn find_by_org(&self, org_id: Snowflake) -> RepoResult<Vec<Template>> {
        let results = sqlx::query_as::<_, TemplateModel>(
            r"
            SELECT id, uuid, org_id, name, created_on, modified_on
            FROM templates
            WHERE org_id = $1
            ORDER BY name, id
            ",
        )
        .bind(org_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Template::from).collect())
    }

    #[instrument(skip(self, template), fields(template_id = %template.id, name = %template.name))]
    async fn create(&self, template: &Template) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO templates (id, uuid, org_id, name, created_on, modified_on)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(template.id.into_inner())
        .bind(template.uuid)
        .bind(template.org_id.into_inner())
        .bind(&template.name)
        .bind(template.created_on)
        .bind(template.modified_on)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::TemplateAlreadyExists(template.name.clone()))
        })?;

        Ok(())
    }
}
