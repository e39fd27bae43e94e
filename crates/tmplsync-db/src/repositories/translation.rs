//! PostgreSQL implementation of TranslationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use tmplsync_core::entities::TemplateTranslation;
use tmplsync_core::error::DomainError;
use tmplsync_core::traits::{RepoResult, TranslationRepository};
use tmplsync_core::value_objects::Snowflake;

use crate::mappers::TranslationInsert;
use crate::models::TranslationModel;

use super::error::{map_db_error, map_unique_violation, try_map_all};

/// PostgreSQL implementation of TranslationRepository
#[derive(Clone)]
pub struct PgTranslationRepository {
    pool: PgPool,
}

impl PgTranslationRepository {
    /// Create a new PgTranslationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TranslationRepository for PgTranslationRepository {
    #[instrument(skip(self))]
    async fn find_active_by_external_id(
        &self,
        channel_id: Snowflake,
        external_id: &str,
    ) -> RepoResult<Option<TemplateTranslation>> {
        let sql = format!(
            "SELECT {} FROM template_translations \
             WHERE channel_id = $1 AND external_id = $2 AND is_active",
            TranslationModel::COLUMNS
        );

        let result = sqlx::query_as::<_, TranslationModel>(&sql)
            .bind(channel_id.into_inner())
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(TemplateTranslation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_active_by_channel(&self, channel_id: Snowflake) -> RepoResult<Vec<TemplateTranslation>> {
        let sql = format!(
            "SELECT {} FROM template_translations \
             WHERE channel_id = $1 AND is_active \
             ORDER BY template_id, locale",
            TranslationModel::COLUMNS
        );

        let results = sqlx::query_as::<_, TranslationModel>(&sql)
            .bind(channel_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        try_map_all(results)
    }

    #[instrument(skip(self))]
    async fn find_active_by_org(&self, org_id: Snowflake) -> RepoResult<Vec<TemplateTranslation>> {
        let results = sqlx::query_as::<_, TranslationModel>(
            r"
            SELECT t.id, t.template_id, t.channel_id, t.locale, t.external_locale, t.external_id,
                   t.namespace, t.status, t.components, t.variable_count, t.is_active, t.created_on
            FROM template_translations t
            JOIN channels c ON c.id = t.channel_id
            WHERE c.org_id = $1 AND c.is_active AND t.is_active
            ORDER BY t.channel_id, t.locale, t.id
            ",
        )
        .bind(org_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        try_map_all(results)
    }

    #[instrument(skip(self, translation), fields(
        translation_id = %translation.id,
        channel_id = %translation.channel_id,
        external_id = %translation.external_id,
    ))]
    async fn replace(
        &self,
        previous: Option<Snowflake>,
        translation: &TemplateTranslation,
        modified_on: DateTime<Utc>,
    ) -> RepoResult<()> {
        let insert = TranslationInsert::new(translation);

        // Dropping the transaction on an early return rolls it back
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        if let Some(previous) = previous {
            let result = sqlx::query(
                "UPDATE template_translations SET is_active = FALSE WHERE id = $1 AND is_active",
            )
            .bind(previous.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if result.rows_affected() == 0 {
                return Err(DomainError::TranslationNotFound(previous));
            }
        }

        sqlx::query(
            r"
            UPDATE template_translations
            SET is_active = FALSE
            WHERE channel_id = $1 AND template_id = $2 AND locale = $3 AND is_active
            ",
        )
        .bind(insert.channel_id)
        .bind(insert.template_id)
        .bind(&insert.locale)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO template_translations (
                id, template_id, channel_id, locale, external_locale, external_id, namespace,
                status, components, variable_count, is_active, created_on
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(insert.id)
        .bind(insert.template_id)
        .bind(insert.channel_id)
        .bind(&insert.locale)
        .bind(insert.external_locale)
        .bind(insert.external_id)
        .bind(insert.namespace)
        .bind(&insert.status)
        .bind(Json(insert.components))
        .bind(insert.variable_count)
        .bind(insert.is_active)
        .bind(translation.created_on)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::ActiveTranslationExists(translation.external_id.clone())
            })
        })?;

        let result = sqlx::query("UPDATE templates SET modified_on = $2 WHERE id = $1")
            .bind(insert.template_id)
            .bind(modified_on)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TemplateNotFound(translation.template_id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, keep), fields(keep = keep.len()))]
    async fn deactivate_except(&self, channel_id: Snowflake, keep: &[Snowflake]) -> RepoResult<u64> {
        let keep: Vec<i64> = keep.iter().copied().map(Snowflake::into_inner).collect();

        let result = sqlx::query(
            r"
            UPDATE template_translations
            SET is_active = FALSE
            WHERE channel_id = $1 AND is_active AND NOT (id = ANY($2))
            ",
        )
        .bind(channel_id.into_inner())
        .bind(keep)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
