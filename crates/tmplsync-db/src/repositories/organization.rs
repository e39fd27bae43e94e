//! PostgreSQL implementation of OrganizationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tmplsync_core::entities::Organization;
use tmplsync_core::traits::{OrganizationRepository, RepoResult};
use tmplsync_core::value_objects::Snowflake;

use crate::models::OrganizationModel;

use super::error::map_db_error;

/// PostgreSQL implementation of OrganizationRepository
#[derive(Clone)]
pub struct PgOrganizationRepository {
    pool: PgPool,
}

impl PgOrganizationRepository {
    /// Create a new PgOrganizationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationRepository for PgOrganizationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Organization>> {
        let result = sqlx::query_as::<_, OrganizationModel>(
            r"
            SELECT id, name, is_active, is_suspended, created_at
            FROM organizations
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Organization::from))
    }

    #[instrument(skip(self, org), fields(org_id = %org.id))]
    async fn create(&self, org: &Organization) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO organizations (id, name, is_active, is_suspended, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(org.id.into_inner())
        .bind(&org.name)
        .bind(org.is_active)
        .bind(org.is_suspended)
        .bind(org.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
