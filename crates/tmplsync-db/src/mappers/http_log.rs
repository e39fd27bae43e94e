//! HTTP log entity <-> model mapper

use tmplsync_core::entities::{HttpLog, HttpLogType};
use tmplsync_core::error::DomainError;
use tmplsync_core::value_objects::Snowflake;

use crate::models::HttpLogModel;

/// Convert HttpLogModel to HttpLog entity
impl TryFrom<HttpLogModel> for HttpLog {
    type Error = DomainError;

    fn try_from(model: HttpLogModel) -> Result<Self, Self::Error> {
        let log_type = HttpLogType::parse(&model.log_type).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown http log type: {}", model.log_type))
        })?;

        Ok(HttpLog {
            id: Snowflake::new(model.id),
            org_id: Snowflake::new(model.org_id),
            channel_id: Snowflake::new(model.channel_id),
            log_type,
            url: model.url,
            status_code: model.status_code,
            request_time_ms: model.request_time_ms,
            is_error: model.is_error,
            created_on: model.created_on,
        })
    }
}
