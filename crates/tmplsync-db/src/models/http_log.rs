//! HTTP log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for http_logs table
#[derive(Debug, Clone, FromRow)]
pub struct HttpLogModel {
    pub id: i64,
    pub org_id: i64,
    pub channel_id: i64,
    pub log_type: String,
    pub url: String,
    pub status_code: Option<i32>,
    pub request_time_ms: i64,
    pub is_error: bool,
    pub created_on: DateTime<Utc>,
}
