//! Organization database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for organizations table
#[derive(Debug, Clone, FromRow)]
pub struct OrganizationModel {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub is_suspended: bool,
    pub created_at: DateTime<Utc>,
}
