//! Response DTOs
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use tmplsync_core::{Components, TranslationStatus};

/// Template with its active translations
#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub id: String,
    pub uuid: Uuid,
    pub name: String,
    pub created_on: DateTime<Utc>,
    pub modified_on: DateTime<Utc>,
    pub translations: Vec<TranslationResponse>,
}

/// One active translation of a template
#[derive(Debug, Serialize)]
pub struct TranslationResponse {
    pub id: String,
    pub channel_id: String,
    pub locale: String,
    pub external_locale: String,
    pub external_id: String,
    pub namespace: String,
    pub status: TranslationStatus,
    pub components: Components,
    pub variable_count: i32,
    /// Header, body and footer joined by blank lines
    pub content: String,
    pub created_on: DateTime<Utc>,
}
