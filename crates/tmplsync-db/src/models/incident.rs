//! Incident database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for incidents table
#[derive(Debug, Clone, FromRow)]
pub struct IncidentModel {
    pub id: i64,
    pub org_id: i64,
    pub channel_id: i64,
    /// Incident type slug, e.g. `channel:templates_failed`
    pub incident_type: String,
    pub started_on: DateTime<Utc>,
    pub ended_on: Option<DateTime<Utc>>,
}

impl IncidentModel {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.ended_on.is_none()
    }
}
