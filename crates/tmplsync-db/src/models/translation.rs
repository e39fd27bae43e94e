//! Template translation database model

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use tmplsync_core::Components;

/// Database model for template_translations table
#[derive(Debug, Clone, FromRow)]
pub struct TranslationModel {
    pub id: i64,
    pub template_id: i64,
    pub channel_id: i64,
    /// Internal locale, e.g. `eng-US`
    pub locale: String,
    pub external_locale: String,
    pub external_id: String,
    pub namespace: String,
    /// Single character status code (`P`, `A`, `R`, `U`)
    pub status: String,
    pub components: Json<Components>,
    pub variable_count: i32,
    pub is_active: bool,
    pub created_on: DateTime<Utc>,
}

impl TranslationModel {
    /// Columns selected for every translation query
    pub const COLUMNS: &'static str = "id, template_id, channel_id, locale, external_locale, \
        external_id, namespace, status, components, variable_count, is_active, created_on";
}
