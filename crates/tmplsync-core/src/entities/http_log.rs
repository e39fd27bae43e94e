//! HTTP log entity - append-only record of a vendor API call

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// What the logged request was for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HttpLogType {
    /// A template list request made during a sync
    WhatsappTemplatesSynced,
}

impl HttpLogType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WhatsappTemplatesSynced => "whatsapp_templates_synced",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "whatsapp_templates_synced" => Some(Self::WhatsappTemplatesSynced),
            _ => None,
        }
    }
}

/// One vendor request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpLog {
    pub id: Snowflake,
    pub org_id: Snowflake,
    pub channel_id: Snowflake,
    pub log_type: HttpLogType,
    pub url: String,
    /// `None` when no response was received
    pub status_code: Option<i32>,
    pub request_time_ms: i64,
    pub is_error: bool,
    pub created_on: DateTime<Utc>,
}
