//! Incident entity - an ongoing operational problem surfaced to users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Incident type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentType {
    /// Template syncing keeps failing for a channel
    #[serde(rename = "channel:templates_failed")]
    ChannelTemplatesFailed,
}

impl IncidentType {
    pub fn slug(self) -> &'static str {
        match self {
            Self::ChannelTemplatesFailed => "channel:templates_failed",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "channel:templates_failed" => Some(Self::ChannelTemplatesFailed),
            _ => None,
        }
    }
}

/// Incident scoped to a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    pub id: Snowflake,
    pub org_id: Snowflake,
    pub channel_id: Snowflake,
    pub incident_type: IncidentType,
    pub started_on: DateTime<Utc>,
    pub ended_on: Option<DateTime<Utc>>,
}

impl Incident {
    /// Open a new incident now
    #[must_use]
    pub fn open(id: Snowflake, org_id: Snowflake, channel_id: Snowflake, incident_type: IncidentType) -> Self {
        Self {
            id,
            org_id,
            channel_id,
            incident_type,
            started_on: Utc::now(),
            ended_on: None,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.ended_on.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_roundtrip() {
        let t = IncidentType::ChannelTemplatesFailed;
        assert_eq!(IncidentType::from_slug(t.slug()), Some(t));
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"channel:templates_failed\"");
    }

    #[test]
    fn test_open_incident() {
        let incident = Incident::open(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            IncidentType::ChannelTemplatesFailed,
        );
        assert!(incident.is_open());
    }
}
