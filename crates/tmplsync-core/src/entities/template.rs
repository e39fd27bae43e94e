//! Template entity - an organization-wide named message template

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::Snowflake;

/// Template entity, unique per (organization, name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: Snowflake,
    pub uuid: Uuid,
    pub org_id: Snowflake,
    pub name: String,
    pub created_on: DateTime<Utc>,
    pub modified_on: DateTime<Utc>,
}

impl Template {
    /// Create a new template
    #[must_use]
    pub fn new(id: Snowflake, org_id: Snowflake, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            uuid: Uuid::new_v4(),
            org_id,
            name: name.into(),
            created_on: now,
            modified_on: now,
        }
    }

    /// Advance `modified_on`, strictly past its previous value even when the
    /// clock hasn't ticked since the last change
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.modified_on = if now > self.modified_on {
            now
        } else {
            self.modified_on + chrono::Duration::microseconds(1)
        };
    }
}
