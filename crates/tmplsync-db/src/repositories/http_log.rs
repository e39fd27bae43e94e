//! PostgreSQL implementation of HttpLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tmplsync_core::entities::{HttpLog, HttpLogType};
use tmplsync_core::traits::{HttpLogRepository, RepoResult};
use tmplsync_core::value_objects::Snowflake;

use crate::models::HttpLogModel;

use super::error::{map_db_error, try_map_all};

/// PostgreSQL implementation of HttpLogRepository
#[derive(Clone)]
pub struct PgHttpLogRepository {
    pool: PgPool,
}

impl PgHttpLogRepository {
    /// Create a new PgHttpLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HttpLogRepository for PgHttpLogRepository {
    #[instrument(skip(self, log), fields(channel_id = %log.channel_id, is_error = log.is_error))]
    async fn create(&self, log: &HttpLog) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO http_logs (
                id, org_id, channel_id, log_type, url, status_code, request_time_ms, is_error, created_on
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(log.id.into_inner())
        .bind(log.org_id.into_inner())
        .bind(log.channel_id.into_inner())
        .bind(log.log_type.as_str())
        .bind(&log.url)
        .bind(log.status_code)
        .bind(log.request_time_ms)
        .bind(log.is_error)
        .bind(log.created_on)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn recent_for_channel(
        &self,
        channel_id: Snowflake,
        log_type: HttpLogType,
        limit: i64,
    ) -> RepoResult<Vec<HttpLog>> {
        let results = sqlx::query_as::<_, HttpLogModel>(
            r"
            SELECT id, org_id, channel_id, log_type, url, status_code, request_time_ms, is_error, created_on
            FROM http_logs
            WHERE channel_id = $1 AND log_type = $2
            ORDER BY created_on DESC, id DESC
            LIMIT $3
            ",
        )
        .bind(channel_id.into_inner())
        .bind(log_type.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        try_map_all(results)
    }
}
