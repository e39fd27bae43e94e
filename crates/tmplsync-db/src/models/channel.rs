//! Channel database model

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for channels table
#[derive(Debug, Clone, FromRow)]
pub struct ChannelModel {
    pub id: i64,
    pub uuid: Uuid,
    pub org_id: i64,
    pub name: String,
    /// Vendor short code: `WAC`, `WA`, `D3`, `D3C`, `TWA`, ...
    pub channel_type: String,
    pub config: Json<Map<String, Value>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
