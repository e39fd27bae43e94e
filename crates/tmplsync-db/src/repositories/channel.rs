//! PostgreSQL implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use tmplsync_core::entities::{Channel, ChannelType};
use tmplsync_core::traits::{ChannelRepository, RepoResult};
use tmplsync_core::value_objects::Snowflake;

use crate::models::ChannelModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ChannelRepository
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    /// Create a new PgChannelRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT id, uuid, org_id, name, channel_type, config, is_active, created_at
            FROM channels
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self))]
    async fn find_syncable_by_types(&self, types: &[ChannelType]) -> RepoResult<Vec<Channel>> {
        let codes: Vec<String> = types.iter().map(|t| t.code().to_string()).collect();

        let results = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT c.id, c.uuid, c.org_id, c.name, c.channel_type, c.config, c.is_active, c.created_at
            FROM channels c
            JOIN organizations o ON o.id = c.org_id
            WHERE c.is_active
              AND c.channel_type = ANY($1)
              AND o.is_active
              AND NOT o.is_suspended
            ORDER BY c.id
            ",
        )
        .bind(codes)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channels (id, uuid, org_id, name, channel_type, config, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(channel.id.into_inner())
        .bind(channel.uuid)
        .bind(channel.org_id.into_inner())
        .bind(&channel.name)
        .bind(channel.channel_type.code())
        .bind(Json(&channel.config))
        .bind(channel.is_active)
        .bind(channel.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
