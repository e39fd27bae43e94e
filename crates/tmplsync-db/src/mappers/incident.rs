//! Incident entity <-> model mapper

use tmplsync_core::entities::{Incident, IncidentType};
use tmplsync_core::error::DomainError;
use tmplsync_core::value_objects::Snowflake;

use crate::models::IncidentModel;

/// Convert IncidentModel to Incident entity
impl TryFrom<IncidentModel> for Incident {
    type Error = DomainError;

    fn try_from(model: IncidentModel) -> Result<Self, Self::Error> {
        let incident_type = IncidentType::from_slug(&model.incident_type).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown incident type: {}", model.incident_type))
        })?;

        Ok(Incident {
            id: Snowflake::new(model.id),
            org_id: Snowflake::new(model.org_id),
            channel_id: Snowflake::new(model.channel_id),
            incident_type,
            started_on: model.started_on,
            ended_on: model.ended_on,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_incident_from_model() {
        let model = IncidentModel {
            id: 1,
            org_id: 2,
            channel_id: 3,
            incident_type: "channel:templates_failed".to_string(),
            started_on: Utc::now(),
            ended_on: None,
        };
        assert!(model.is_open());

        let incident = Incident::try_from(model).unwrap();
        assert_eq!(incident.incident_type, IncidentType::ChannelTemplatesFailed);
        assert!(incident.is_open());
    }
}
