//! PostgreSQL implementation of IncidentRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use tmplsync_core::entities::{Incident, IncidentType};
use tmplsync_core::error::DomainError;
use tmplsync_core::traits::{IncidentRepository, RepoResult};
use tmplsync_core::value_objects::Snowflake;

use crate::models::IncidentModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of IncidentRepository
#[derive(Clone)]
pub struct PgIncidentRepository {
    pool: PgPool,
}

impl PgIncidentRepository {
    /// Create a new PgIncidentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IncidentRepository for PgIncidentRepository {
    #[instrument(skip(self))]
    async fn find_open(
        &self,
        channel_id: Snowflake,
        incident_type: IncidentType,
    ) -> RepoResult<Option<Incident>> {
        let result = sqlx::query_as::<_, IncidentModel>(
            r"
            SELECT id, org_id, channel_id, incident_type, started_on, ended_on
            FROM incidents
            WHERE channel_id = $1 AND incident_type = $2 AND ended_on IS NULL
            ",
        )
        .bind(channel_id.into_inner())
        .bind(incident_type.slug())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Incident::try_from).transpose()
    }

    #[instrument(skip(self, incident), fields(incident_id = %incident.id, channel_id = %incident.channel_id))]
    async fn create(&self, incident: &Incident) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO incidents (id, org_id, channel_id, incident_type, started_on, ended_on)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(incident.id.into_inner())
        .bind(incident.org_id.into_inner())
        .bind(incident.channel_id.into_inner())
        .bind(incident.incident_type.slug())
        .bind(incident.started_on)
        .bind(incident.ended_on)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::IncidentAlreadyOpen(incident.channel_id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn end(&self, id: Snowflake, ended_on: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE incidents SET ended_on = $2 WHERE id = $1 AND ended_on IS NULL",
        )
        .bind(id.into_inner())
        .bind(ended_on)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::IncidentNotFound(id));
        }

        Ok(())
    }
}
