//! Organization entity - the tenant that owns channels and templates

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Organization (workspace owner); read-only from the sync's point of view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: Snowflake,
    pub name: String,
    pub is_active: bool,
    pub is_suspended: bool,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_active: true,
            is_suspended: false,
            created_at: Utc::now(),
        }
    }

    /// Whether channels of this organization take part in template syncs
    #[inline]
    #[must_use]
    pub fn is_syncable(&self) -> bool {
        self.is_active && !self.is_suspended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syncable() {
        let mut org = Organization::new(Snowflake::new(1), "Nyaruka");
        assert!(org.is_syncable());

        org.is_suspended = true;
        assert!(!org.is_syncable());

        org.is_suspended = false;
        org.is_active = false;
        assert!(!org.is_syncable());
    }
}
